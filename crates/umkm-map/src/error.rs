use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("mount point \"{0}\" does not exist")]
    MissingMountPoint(String),

    #[error("mount point \"{0}\" already hosts a live map")]
    MountPointBusy(String),
}
