//! Interfaces of the external collaborators: tool library, bin store and the
//! solid regeneration service.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::cancel::CancellationToken;
use crate::error::{RegenerationError, Result};
use crate::model::{BinData, BinPatch, GenerateResponse, NewBin, Tool, ToolPatch};

/// Tool library persistence.
#[async_trait]
pub trait ToolStore: Send + Sync {
    async fn get_tool(&self, id: &str) -> Result<Tool>;
    async fn list_tools(&self) -> Result<Vec<Tool>>;
    async fn update_tool(&self, id: &str, patch: ToolPatch) -> Result<Tool>;
    async fn delete_tool(&self, id: &str) -> Result<()>;
}

/// Bin layout persistence.
#[async_trait]
pub trait BinStore: Send + Sync {
    async fn get_bin(&self, id: &str) -> Result<BinData>;
    async fn update_bin(&self, id: &str, patch: BinPatch) -> Result<BinData>;
    async fn create_bin(&self, request: NewBin) -> Result<BinData>;
    async fn delete_bin(&self, id: &str) -> Result<()>;
}

/// Produces printable assets for a stored bin.
///
/// Implementations should watch `cancel` and return
/// [`RegenerationError::Cancelled`] once it fires.
#[async_trait]
pub trait RegenerationService: Send + Sync {
    async fn generate_stl(
        &self,
        bin_id: &str,
        cancel: CancellationToken,
    ) -> std::result::Result<GenerateResponse, RegenerationError>;
}
