//! Resolves the camp and speaker a talk request points at. Shared by talk create and update.

use crate::error::{AppError, Failure, OrInternal};
use crate::model::{Camp, Speaker, TalkModel};
use crate::repository::CampRepository;

/// Outcome of looking up the speaker named in a talk model.
#[derive(Debug)]
pub enum SpeakerRef {
    /// The model names no speaker id.
    Missing,
    /// The id did not match any speaker.
    Unknown(i32),
    Found(Speaker),
}

impl SpeakerRef {
    /// The speaker, or the 400 a create request gets without one.
    pub fn required(self) -> Result<Speaker, AppError> {
        match self {
            SpeakerRef::Missing => Err(AppError::BadRequest("Speaker ID is required.".into())),
            SpeakerRef::Unknown(_) => Err(AppError::BadRequest("Speaker could not be found.".into())),
            SpeakerRef::Found(s) => Ok(s),
        }
    }

    pub fn found(self) -> Option<Speaker> {
        match self {
            SpeakerRef::Found(s) => Some(s),
            _ => None,
        }
    }
}

pub struct ReferenceResolver<'a> {
    repo: &'a dyn CampRepository,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(repo: &'a dyn CampRepository) -> Self {
        ReferenceResolver { repo }
    }

    /// Parent camp for a new talk; 400 when it does not exist.
    pub async fn camp(&self, moniker: &str) -> Result<Camp, AppError> {
        self.repo
            .camp(moniker, false)
            .await
            .or_internal(Failure::RetrieveResource)?
            .ok_or_else(|| AppError::BadRequest("Camp does not exist.".into()))
    }

    pub async fn speaker(&self, model: &TalkModel) -> Result<SpeakerRef, AppError> {
        let Some(speaker_id) = model.speaker_id() else {
            return Ok(SpeakerRef::Missing);
        };
        let speaker = self
            .repo
            .speaker(speaker_id)
            .await
            .or_internal(Failure::RetrieveResource)?;
        Ok(match speaker {
            Some(s) => SpeakerRef::Found(s),
            None => SpeakerRef::Unknown(speaker_id),
        })
    }
}
