use thiserror::Error;

/// Everything that can go wrong while turning Coq source into rule blocks.
///
/// All of these are detected at extraction or parse time; rendering itself
/// never fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("expected a symbol at the head of expression `{0}`")]
    MissingHead(String),

    #[error("unbalanced parenthesis group in `{0}`")]
    Unbalanced(String),

    #[error("no inductive declaration found for `{0}`")]
    DeclarationNotFound(String),

    #[error(
        "bound variable count mismatch for {relation}.{ctor}: parsed [{}] vs recovered [{}]",
        .parsed.join(","),
        .recovered.join(",")
    )]
    BinderCountMismatch {
        relation: String,
        ctor: String,
        parsed: Vec<String>,
        recovered: Vec<String>,
    },
}
