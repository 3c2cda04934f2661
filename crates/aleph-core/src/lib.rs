//! Core of the Marathon launcher: config root resolution, game data
//! presence and purging, the icon cascade, and the download/launch flows.
//!
//! The graphical shell is a thin collaborator on top of this crate: it
//! calls [`download::Downloader::trigger`], [`launch::launch`] and
//! [`icon::resolve`] and owns nothing but presentation.

pub mod command;
pub mod config;
pub mod dataset;
pub mod download;
pub mod exepath;
pub mod icon;
pub mod launch;
pub mod purge;
pub mod terminal;
pub mod ui;
