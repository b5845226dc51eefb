//! Events shared by the two panel drivers.

use alloc::string::String;

/// Which timing source drives the active panel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DriverKind {
    Clock,
    Media,
}

/// Identifies one driver installation. Every event a driver produces
/// carries the tag it was installed with, so events that outlive their
/// panel can be recognised and dropped.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DriverTag {
    pub panel_id: String,
    pub generation: u32,
}

impl DriverTag {
    pub fn new(panel_id: impl Into<String>, generation: u32) -> Self {
        Self {
            panel_id: panel_id.into(),
            generation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverEventKind {
    Progress(f32),
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DriverEvent {
    pub tag: DriverTag,
    pub kind: DriverEventKind,
}

impl DriverEvent {
    pub fn progress(tag: DriverTag, fraction: f32) -> Self {
        Self {
            tag,
            kind: DriverEventKind::Progress(fraction),
        }
    }

    pub fn completed(tag: DriverTag) -> Self {
        Self {
            tag,
            kind: DriverEventKind::Completed,
        }
    }
}
