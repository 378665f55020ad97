//! Session domain module.
//!
//! - `model`: who is signed in (`Session`, `Identity`)
//! - `bootstrap`: the identity query run once at start-up (`SessionBootstrap`)

mod bootstrap;
mod model;

pub use bootstrap::{BootstrapOutcome, SessionBootstrap};
pub use model::{Identity, Session};
