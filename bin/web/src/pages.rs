//! Page components for the application.
//!
//! Each page renders one route. Data comes from the injected
//! [`ApiClient`](groupdesk_client::ApiClient).

pub mod dashboard;
pub mod group_detail;
pub mod login;
pub mod register;
pub mod section;

pub use dashboard::DashboardPage;
pub use group_detail::GroupDetailPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use section::SectionPage;
