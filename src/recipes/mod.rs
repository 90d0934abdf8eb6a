//! Recipe registry
//!
//! One module per buildable project, registered here by target name.

mod cherios;
mod epoll_shim;
mod libexpat;
mod libffi;
mod recipe;
mod wayland;

pub use cherios::BuildCheriOs;
pub use epoll_shim::BuildEpollShim;
pub use libexpat::BuildExpat;
pub use libffi::BuildLibffi;
pub use recipe::{BuildContext, InstallDir, Recipe, RecipeSpec};
pub use wayland::BuildWayland;

use crate::error::{ForgeError, ForgeResult};

/// All registered recipes, in listing order
pub fn registry() -> Vec<Box<dyn Recipe>> {
    vec![
        Box::new(BuildCheriOs::new()),
        Box::new(BuildEpollShim::new()),
        Box::new(BuildExpat::new()),
        Box::new(BuildLibffi::new()),
        Box::new(BuildWayland::new()),
    ]
}

/// Look up a recipe by target name
pub fn find(target: &str) -> ForgeResult<Box<dyn Recipe>> {
    registry()
        .into_iter()
        .find(|recipe| recipe.spec().target == target)
        .ok_or_else(|| ForgeError::RecipeNotFound(target.to_string()))
}
