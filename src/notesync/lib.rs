//! # Notesync Architecture
//!
//! Notesync is a **UI-agnostic note-synchronization library**: it reconciles
//! a remote note store with markdown files in a local vault folder, and
//! happens to ship a CLI client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, prints messages, handles exit codes    │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the sync reentrancy guard                           │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - sync / push / pull / status / init / config              │
//! │  - Drives the reconciliation engine (index, diff, apply)    │
//! │  - No I/O assumptions beyond the two trait seams            │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                        │
//!                   ▼                        ▼
//! ┌──────────────────────────┐  ┌──────────────────────────────┐
//! │  Vault (vault/)          │  │  Remote store (remote/)      │
//! │  - Vault trait           │  │  - NoteStore trait           │
//! │  - FsVault, InMemoryVault│  │  - HttpNoteStore, in-memory  │
//! └──────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! ## The Reconciliation Engine
//!
//! The note id carried in a file's front matter is the sole join key between
//! remote and local. One pass in either direction:
//!
//! - **Push**: [`index`] scans the folder into an id-keyed map, [`diff`]
//!   selects the records modified since the last sync (or locally renamed),
//!   and the remote store uploads them in bulk. Nothing is sent when the
//!   selection is empty.
//! - **Pull**: the remote set is fetched, tombstones are split off, and
//!   [`apply`] materializes each live note: overwrite-then-rename for known
//!   ids (the file's identity survives), create for new ones, replacing any
//!   orphaned file squatting on the target name.
//!
//! Conflict resolution is last-writer-wins at file granularity.
//!
//! ## Key Principle: No Ambient State
//!
//! Settings are a value object passed explicitly into every command; the
//! caller persists them at defined lifecycle points (load before first sync,
//! save after every mutation). The last-sync timestamp only advances when a
//! cycle reports full success.
//!
//! ## Testing Strategy
//!
//! 1. **Engine + commands**: unit tests against `InMemoryVault` (stable file
//!    identities, operation log) and `InMemoryNoteStore` (recorded pushes,
//!    injected failures). This is where the lion's share of testing lives.
//! 2. **CLI** (`tests/`): binary-level tests of the offline commands.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`index`]: Folder scan → id-keyed local note records
//! - [`diff`]: Push-side selection and formatting
//! - [`apply`]: Pull-side reconciliation
//! - [`template`]: Placeholder rendering for pulled notes
//! - [`frontmatter`]: The `---` metadata block
//! - [`vault`]: Filesystem abstraction and implementations
//! - [`remote`]: Note-store abstraction and HTTP client
//! - [`config`]: Configuration management
//! - [`model`]: Core data types (`Note`, `NoteUpdate`, `SyncMode`)
//! - [`error`]: Error types

pub mod api;
pub mod apply;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod model;
pub mod remote;
pub mod template;
pub mod vault;
