pub mod gate;
pub mod navbar;
pub mod pages;
pub mod render;

pub use gate::{AuthGate, GateView, LOGIN_REQUIRED_NOTICE};
pub use navbar::{AccountView, NavBar, NavView};
pub use pages::Page;
