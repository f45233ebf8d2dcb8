#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod config;
pub mod error;
pub mod prompt;
pub mod tutor_loop;
pub mod tutor_service;

pub use tutor_core::Clock;

pub use ai::{CompletionBackend, CompletionRequest, HttpCompletionBackend};
pub use app_services::AppServices;
pub use config::{ApiConfig, TutorConfig};
pub use error::{AppServicesError, CompletionError, TutorError};
pub use prompt::ExplanationRequest;
pub use tutor_loop::{CompletedRequest, PendingRequest, ReplyOutcome, TutorLoopService};
pub use tutor_service::TutorService;
