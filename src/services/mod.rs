pub mod account_service;
pub mod click_service;
pub mod link_service;

pub use account_service::AccountService;
pub use click_service::{ClickRecord, ClickService};
pub use link_service::{CreateLinkRequest, LinkDetail, LinkService};
