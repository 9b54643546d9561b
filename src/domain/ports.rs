use crate::utils::error::Result;

/// Byte storage addressed by paths relative to the storage root.
pub trait Storage: Send {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn catalog_path(&self) -> &str;
    fn usage_path(&self) -> &str;
    fn validate_catalog(&self) -> bool;
}
