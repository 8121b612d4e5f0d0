use thiserror::Error;

use crate::catalogue::CatalogueError;
use crate::model::PatternError;
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
