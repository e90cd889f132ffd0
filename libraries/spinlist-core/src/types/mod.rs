//! Domain types

mod ids;
mod playback_session;
mod track;
mod upload;

pub use ids::TrackId;
pub use playback_session::PlaybackSession;
pub use track::Track;
pub use upload::{
    RegistrationResponse, TrackRegistration, UploadFile, UploadProgress, UploadedMedia,
};
