//! Signature pad sessions against agreement records.

use bevy::prelude::*;
use thiserror::Error;

use crate::canvas::{CanvasError, SignatureCapture};
use crate::records::{RecordError, RecordStore, SignatureSlot, attach_signature};

use super::messages::{OpenSignatureRequest, SaveSignatureRequest};
use super::notifications::Notifications;
use super::AgreementStore;

/// Which agreement slot the pad is signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningTarget {
    pub agreement_id: String,
    pub slot: SignatureSlot,
}

#[derive(Debug, Error)]
pub enum SignatureSaveError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// The signature pad. It is open while `target` is set.
#[derive(Resource)]
pub struct SignaturePad {
    pub capture: SignatureCapture,
    pub target: Option<SigningTarget>,
    /// Bumped whenever the ink changes so views know to re-upload
    pub revision: u64,
}

impl SignaturePad {
    pub fn new(capture: SignatureCapture) -> Self {
        Self {
            capture,
            target: None,
            revision: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Start a fresh signing session; any previous ink is discarded.
    pub fn open(&mut self, target: SigningTarget) {
        self.capture.clear();
        self.target = Some(target);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.capture.clear();
        self.revision += 1;
    }

    pub fn close(&mut self) {
        self.capture.clear();
        self.target = None;
        self.revision += 1;
    }

    /// Store the ink in the target slot and close the pad. The pad stays
    /// open with its ink if anything fails.
    pub fn save(
        &mut self,
        store: &mut dyn RecordStore,
    ) -> Result<Option<SigningTarget>, SignatureSaveError> {
        let Some(target) = self.target.clone() else {
            return Ok(None);
        };
        let data_uri = self.capture.export_data_uri()?;
        attach_signature(store, &target.agreement_id, target.slot, &data_uri)?;
        self.close();
        Ok(Some(target))
    }
}

pub fn handle_open_signature(
    mut events: MessageReader<OpenSignatureRequest>,
    pad: Option<ResMut<SignaturePad>>,
    mut notifications: ResMut<Notifications>,
) {
    let Some(mut pad) = pad else {
        for _ in events.read() {
            notifications.error("Cannot sign", "the signature pad is unavailable");
        }
        return;
    };
    for event in events.read() {
        info!(
            "Signing {} slot of agreement {}",
            event.slot.label(),
            event.agreement_id
        );
        pad.open(SigningTarget {
            agreement_id: event.agreement_id.clone(),
            slot: event.slot,
        });
    }
}

pub fn handle_save_signature(
    mut events: MessageReader<SaveSignatureRequest>,
    pad: Option<ResMut<SignaturePad>>,
    mut agreements: ResMut<AgreementStore>,
    mut notifications: ResMut<Notifications>,
) {
    let Some(mut pad) = pad else {
        events.clear();
        return;
    };
    for _ in events.read() {
        match pad.save(agreements.0.as_mut()) {
            Ok(Some(target)) => notifications.success(format!(
                "{} signature saved",
                target.slot.label()
            )),
            Ok(None) => {}
            Err(e) => notifications.error("Could not save signature", e),
        }
    }
}
