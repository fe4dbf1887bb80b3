//! # Tracefinity Sync
//!
//! Background work behind an editing session.
//!
//! - [`Debouncer`]: trailing-edge scheduler with flush and cancel
//! - [`SaveCoalescer`]: debounced store writes with a save status channel
//! - [`RegenerationPipeline`]: fingerprinted, cancellable regeneration requests
//! - [`BinSession`] / [`ToolSession`]: an editor wired to its stores
//!
//! ```rust,ignore
//! let mut session = BinSession::load(bins, tools, service, "bin-1", SessionOptions::default()).await?;
//! session.editor_mut().pointer_down(&target, client, PointerButton::Primary);
//! session.editor_mut().pointer_up();
//! session.sync()?;
//! session.close().await?;
//! ```

pub mod persistence;
pub mod regeneration;
pub mod scheduler;
pub mod session;

pub use persistence::{SaveCoalescer, SaveStatus};
pub use regeneration::{Fingerprint, RegenerationOutput, RegenerationPipeline, RunOutcome};
pub use scheduler::{Debouncer, Task};
pub use session::{BinSession, SessionOptions, ToolSession};
