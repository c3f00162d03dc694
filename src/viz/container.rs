//! Named mount points, each receiving exactly one drawing surface.

use super::render::{format_for_path, render_to_file};
use super::scene::Scene;
use super::types::{BAR_MOUNT, LINE_MOUNT, SurfaceFormat};
use crate::error::{Error, Result};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct Mount {
    id: String,
    path: PathBuf,
    format: SurfaceFormat,
    attached: bool,
}

/// Binds chart scenes to output files by mount point id.
#[derive(Debug, Clone, Default)]
pub struct Container {
    mounts: Vec<Mount>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container with `bar` and `line` mount points at `<dir>/bar.<ext>` and
    /// `<dir>/line.<ext>`.
    pub fn in_dir<P: AsRef<Path>>(dir: P, format: SurfaceFormat) -> Self {
        let dir = dir.as_ref();
        let mut c = Self::new();
        for id in [BAR_MOUNT, LINE_MOUNT] {
            c.mounts.push(Mount {
                id: id.to_string(),
                path: dir.join(format!("{id}.{}", format.extension())),
                format,
                attached: false,
            });
        }
        c
    }

    /// Register a mount point; the surface format follows the file extension.
    pub fn mount(&mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> Result<()> {
        let id = id.into();
        if self.has_mount(&id) {
            return Err(Error::Config(format!("mount point `{id}` is already registered")));
        }
        let path = path.into();
        let format = format_for_path(&path);
        self.mounts.push(Mount {
            id,
            path,
            format,
            attached: false,
        });
        Ok(())
    }

    pub fn has_mount(&self, id: &str) -> bool {
        self.mounts.iter().any(|m| m.id == id)
    }

    /// Fail unless every id names a registered mount that has no surface yet.
    pub fn ensure_free(&self, ids: &[&str]) -> Result<()> {
        for &id in ids {
            let mount = self
                .mounts
                .iter()
                .find(|m| m.id == id)
                .ok_or_else(|| Error::MountPointMissing(id.to_string()))?;
            if mount.attached {
                return Err(Error::SurfaceExists(id.to_string()));
            }
        }
        Ok(())
    }

    pub fn path(&self, id: &str) -> Option<&Path> {
        self.mounts.iter().find(|m| m.id == id).map(|m| m.path.as_path())
    }

    /// Create the mount's surface at the scene's declared size and draw into it.
    /// The surface is released when this returns.
    pub fn render(&mut self, id: &str, scene: &Scene) -> Result<&Path> {
        let mount = self
            .mounts
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::MountPointMissing(id.to_string()))?;
        if mount.attached {
            return Err(Error::SurfaceExists(id.to_string()));
        }
        if let Some(parent) = mount.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        render_to_file(&mount.path, scene, mount.format)?;
        mount.attached = true;
        info!(
            "drew {}x{} surface `{}` to {}",
            scene.width,
            scene.height,
            id,
            mount.path.display()
        );
        Ok(mount.path.as_path())
    }

    /// Drop every mount point and return the files that received a surface.
    pub fn teardown(self) -> Vec<PathBuf> {
        self.mounts
            .into_iter()
            .filter(|m| m.attached)
            .map(|m| m.path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mount_is_an_error() {
        let mut c = Container::new();
        let err = c.render("bar", &Scene::new(10, 10)).unwrap_err();
        assert!(matches!(err, Error::MountPointMissing(id) if id == "bar"));
    }

    #[test]
    fn a_mount_takes_one_surface() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = Container::new();
        c.mount("bar", dir.path().join("bar.svg")).unwrap();
        assert!(c.mount("bar", dir.path().join("other.svg")).is_err());

        c.render("bar", &Scene::new(30, 20)).unwrap();
        let err = c.render("bar", &Scene::new(30, 20)).unwrap_err();
        assert!(matches!(err, Error::SurfaceExists(_)));
        assert_eq!(c.teardown(), vec![dir.path().join("bar.svg")]);
    }

    #[test]
    fn ensure_free_checks_every_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = Container::new();
        c.mount("bar", dir.path().join("bar.svg")).unwrap();
        let err = c.ensure_free(&["bar", "line"]).unwrap_err();
        assert!(matches!(err, Error::MountPointMissing(id) if id == "line"));

        c.mount("line", dir.path().join("line.svg")).unwrap();
        c.ensure_free(&["bar", "line"]).unwrap();
        c.render("line", &Scene::new(30, 20)).unwrap();
        let err = c.ensure_free(&["bar", "line"]).unwrap_err();
        assert!(matches!(err, Error::SurfaceExists(id) if id == "line"));
        assert!(!dir.path().join("bar.svg").exists());
    }

    #[test]
    fn in_dir_mounts_both_charts() {
        let c = Container::in_dir("out", SurfaceFormat::Png);
        assert_eq!(c.path("bar"), Some(Path::new("out/bar.png")));
        assert_eq!(c.path("line"), Some(Path::new("out/line.png")));
    }
}
