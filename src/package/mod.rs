/*!
 * Package Module
 * Package descriptors and their discovery from the project tree
 */

pub mod descriptor;
pub mod discovery;
pub mod glob;

pub use descriptor::{clean_package_path, parent_folder, PackageDescriptor, PolicyConfig};
pub use discovery::PackageDiscovery;
pub use glob::GlobPattern;
