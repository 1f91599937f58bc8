//! Stock container factories.

use crate::containers::ContainerFactory;
use crate::containers::ContainerProbe;
use crate::model::ArchiveFlavor;

/// Enterprise application archives: `META-INF/application.xml` marker or
/// `.ear` extension.
pub struct EarContainerFactory;

impl ContainerFactory for EarContainerFactory {
    fn container_type(&self) -> &'static str {
        "ear"
    }

    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool {
        probe.flavor() == ArchiveFlavor::Zip
            && (probe.has_entry("META-INF/application.xml")
                || probe.extension().as_deref() == Some("ear"))
    }
}

/// Web application archives: `WEB-INF` marker or `.war` extension.
pub struct WarContainerFactory;

impl ContainerFactory for WarContainerFactory {
    fn container_type(&self) -> &'static str {
        "war"
    }

    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool {
        probe.flavor() == ArchiveFlavor::Zip
            && (probe.has_entry("WEB-INF") || probe.extension().as_deref() == Some("war"))
    }
}

/// Java module archives: a `classes/` folder or `.jmod` extension.
pub struct JmodContainerFactory;

impl ContainerFactory for JmodContainerFactory {
    fn container_type(&self) -> &'static str {
        "jmod"
    }

    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool {
        probe.flavor() == ArchiveFlavor::Zip
            && (probe.extension().as_deref() == Some("jmod") || probe.has_entry("classes"))
    }
}

/// Java archives: `META-INF` marker or `.jar`/`.aar` extension.
pub struct JarContainerFactory;

impl ContainerFactory for JarContainerFactory {
    fn container_type(&self) -> &'static str {
        "jar"
    }

    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool {
        if probe.flavor() != ArchiveFlavor::Zip {
            return false;
        }
        probe.has_entry("META-INF")
            || matches!(probe.extension().as_deref(), Some("jar" | "aar"))
    }
}

/// Tar and tar.gz archives.
pub struct TarContainerFactory;

impl ContainerFactory for TarContainerFactory {
    fn container_type(&self) -> &'static str {
        "tar"
    }

    fn accepts(&self, probe: &ContainerProbe<'_>) -> bool {
        matches!(probe.flavor(), ArchiveFlavor::Tar | ArchiveFlavor::TarGz)
    }
}

/// Catch-all for any archive no other factory claims.
pub struct GenericContainerFactory;

impl ContainerFactory for GenericContainerFactory {
    fn container_type(&self) -> &'static str {
        "generic"
    }

    fn accepts(&self, _probe: &ContainerProbe<'_>) -> bool {
        true
    }
}
