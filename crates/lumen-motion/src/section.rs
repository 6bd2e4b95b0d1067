//! Per-section mount and teardown.
//!
//! A page section hands its `(target, descriptor)` table to
//! `mount_section`, keeps the returned `SectionMount`, and disposes it when
//! the section leaves the page. Disposal cancels every registration made
//! by that mount, which also releases their observer bindings.

use std::fmt;

use crate::document::Document;
use crate::error::Result;
use crate::registry::{AnimationDescriptor, RegistrationHandle, RevealRegistry, RevealTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub &'static str);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Teardown handle for a mounted section.
#[derive(Debug)]
#[must_use = "a SectionMount must be disposed when the section is removed"]
pub struct SectionMount {
    id: SectionId,
    handles: Vec<RegistrationHandle>,
}

impl SectionMount {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn handles(&self) -> &[RegistrationHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancel every registration made by this mount, whatever state its
    /// animations are in. Returns how many were cancelled.
    pub fn dispose<D: Document + ?Sized>(self, registry: &mut RevealRegistry, doc: &mut D) -> usize {
        let mut cancelled = 0;
        for handle in self.handles.iter().rev() {
            // Already gone if a later registration replaced it.
            if registry.cancel(*handle, doc).is_ok() {
                cancelled += 1;
            }
        }
        log::debug!("disposed section {} ({cancelled} registration(s))", self.id);
        cancelled
    }
}

/// Register every entry in order.
///
/// If any registration fails, the ones already made by this call are
/// cancelled before the error is returned, so a failed mount leaves
/// nothing behind.
pub fn mount_section<D: Document + ?Sized>(
    registry: &mut RevealRegistry,
    doc: &mut D,
    id: SectionId,
    entries: &[(RevealTarget, AnimationDescriptor)],
) -> Result<SectionMount> {
    let mut handles: Vec<RegistrationHandle> = Vec::with_capacity(entries.len());
    for (target, descriptor) in entries {
        match registry.register(target.clone(), descriptor.clone(), doc) {
            Ok(handle) => {
                if !handles.contains(&handle) {
                    handles.push(handle);
                }
            }
            Err(err) => {
                log::warn!("mounting section {id} failed: {err}");
                for handle in handles.iter().rev() {
                    if let Err(cancel_err) = registry.cancel(*handle, doc) {
                        log::debug!("rollback of {handle} in section {id}: {cancel_err}");
                    }
                }
                return Err(err);
            }
        }
    }
    log::debug!("mounted section {id} ({} registration(s))", handles.len());
    Ok(SectionMount { id, handles })
}
