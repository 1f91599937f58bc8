//! Container classification: deciding what kind of container an archive is.
//!
//! Mounting an archive is uniform (the workspace reads a zip or tar
//! namespace); what varies is the container *type tag* driving selector
//! lookups. Factories inspect the archive's root path and marker entries
//! and claim a type; the first accepting factory wins, with a catch-all
//! tried last. Factories are registered explicitly; there is no dynamic
//! discovery.

mod factories;

pub use factories::EarContainerFactory;
pub use factories::GenericContainerFactory;
pub use factories::JarContainerFactory;
pub use factories::JmodContainerFactory;
pub use factories::TarContainerFactory;
pub use factories::WarContainerFactory;

use std::sync::Arc;

use crate::model::ArchiveFlavor;
use crate::model::container::Listing;

/// Container type tag used for real directories opened from the host
/// filesystem (directories are not classified through factories).
pub const DIRECTORY_CONTAINER_TYPE: &str = "directory";

/// Decides the archive flavor for a file name, or `None` when the name
/// does not look like a mountable archive.
///
/// `.gz` counts only when the stem ends in `.tar`; a bare `.gz` blob is
/// not a container.
#[must_use]
pub fn detect_flavor(file_name: &str) -> Option<ArchiveFlavor> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "zip" | "jar" | "war" | "ear" | "jmod" | "aar" => Some(ArchiveFlavor::Zip),
        "tar" => Some(ArchiveFlavor::Tar),
        "tgz" => Some(ArchiveFlavor::TarGz),
        "gz" if stem.to_ascii_lowercase().ends_with(".tar") => Some(ArchiveFlavor::TarGz),
        _ => None,
    }
}

/// What a factory may inspect when classifying a freshly mounted archive.
pub struct ContainerProbe<'a> {
    file_name: &'a str,
    flavor: ArchiveFlavor,
    listing: &'a Listing,
}

impl<'a> ContainerProbe<'a> {
    pub(crate) fn new(file_name: &'a str, flavor: ArchiveFlavor, listing: &'a Listing) -> Self {
        Self {
            file_name,
            flavor,
            listing,
        }
    }

    /// File name of the archive being classified.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name
    }

    /// Lower-cased extension of the archive file name, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Archive flavor the workspace mounted.
    #[must_use]
    pub fn flavor(&self) -> ArchiveFlavor {
        self.flavor
    }

    /// Returns `true` if the archive contains the given marker entry
    /// (file or directory), e.g. `META-INF` or `META-INF/application.xml`.
    #[must_use]
    pub fn has_entry(&self, path: &str) -> bool {
        self.listing.contains(path)
    }
}

/// Classifies an archive into a container type.
pub trait ContainerFactory {
    /// Tag this factory assigns, e.g. `"jar"`.
    fn container_type(&self) -> &'static str;

    /// Returns `true` if this factory claims the probed archive.
    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool;
}

/// Ordered set of container factories with a separate catch-all slot.
pub struct ContainerFactorySet {
    factories: Vec<Arc<dyn ContainerFactory>>,
    catch_all: Option<Arc<dyn ContainerFactory>>,
}

impl ContainerFactorySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            catch_all: None,
        }
    }

    /// Creates the stock set: ear, war, jmod, jar, tar, with the generic
    /// zip factory as catch-all.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(EarContainerFactory));
        set.register(Arc::new(WarContainerFactory));
        set.register(Arc::new(JmodContainerFactory));
        set.register(Arc::new(JarContainerFactory));
        set.register(Arc::new(TarContainerFactory));
        set.register_catch_all(Arc::new(GenericContainerFactory));
        set
    }

    /// Appends a factory; earlier registrations are tried first.
    pub fn register(&mut self, factory: Arc<dyn ContainerFactory>) {
        self.factories.push(factory);
    }

    /// Sets the catch-all factory tried after every ordinary factory.
    pub fn register_catch_all(&mut self, factory: Arc<dyn ContainerFactory>) {
        self.catch_all = Some(factory);
    }

    /// Returns the type tag of the first accepting factory.
    #[must_use]
    pub fn classify(&self, probe: &ContainerProbe<'_>) -> Option<&'static str> {
        for factory in &self.factories {
            if factory.accepts(probe) {
                return Some(factory.container_type());
            }
        }
        self.catch_all
            .as_ref()
            .filter(|f| f.accepts(probe))
            .map(|f| f.container_type())
    }
}

impl Default for ContainerFactorySet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_flavor_zip_family() {
        assert_eq!(detect_flavor("app.jar"), Some(ArchiveFlavor::Zip));
        assert_eq!(detect_flavor("app.WAR"), Some(ArchiveFlavor::Zip));
        assert_eq!(detect_flavor("bundle.zip"), Some(ArchiveFlavor::Zip));
        assert_eq!(detect_flavor("java.base.jmod"), Some(ArchiveFlavor::Zip));
    }

    #[test]
    fn test_detect_flavor_tar_family() {
        assert_eq!(detect_flavor("dist.tar"), Some(ArchiveFlavor::Tar));
        assert_eq!(detect_flavor("dist.tar.gz"), Some(ArchiveFlavor::TarGz));
        assert_eq!(detect_flavor("dist.tgz"), Some(ArchiveFlavor::TarGz));
    }

    #[test]
    fn test_detect_flavor_rejects_others() {
        assert_eq!(detect_flavor("App.class"), None);
        assert_eq!(detect_flavor("notes.txt"), None);
        assert_eq!(detect_flavor("blob.gz"), None);
        assert_eq!(detect_flavor("no_extension"), None);
    }

    #[test]
    fn test_classify_first_accept_wins() {
        let set = ContainerFactorySet::with_defaults();
        let listing = Listing::from_records(vec![
            ("WEB-INF/web.xml".to_string(), false, 10),
            ("META-INF/MANIFEST.MF".to_string(), false, 10),
        ]);
        let probe = ContainerProbe::new("app.zip", ArchiveFlavor::Zip, &listing);
        assert_eq!(set.classify(&probe), Some("war"));
    }

    #[test]
    fn test_classify_catch_all_last() {
        let set = ContainerFactorySet::with_defaults();
        let listing = Listing::from_records(vec![("data.bin".to_string(), false, 1)]);
        let probe = ContainerProbe::new("bundle.zip", ArchiveFlavor::Zip, &listing);
        assert_eq!(set.classify(&probe), Some("generic"));
    }
}
