// Everything that talks to the physical split-flap board

pub mod charset;
pub mod client;
pub mod layout;
pub mod renderer;

pub use client::{DisplayClient, VendorError, VestaboardClient};
pub use layout::Phase;
pub use renderer::{BoardContent, BoardRenderer, RenderError};
