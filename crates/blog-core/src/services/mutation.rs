//! Create, edit and delete flows. Every flow answers with a [`Redirect`].
//!
//! Ownership failures are deliberately asymmetric: a non-owner editing a
//! post is sent back to the post unchanged, while deleting someone else's
//! post or touching someone else's comment is a hard `Forbidden`.

use std::sync::Arc;

use uuid::Uuid;

use super::vanished;
use crate::domain::{
    Comment, CommentInput, Post, PostInput, ProfileInput, Redirect, Viewer,
};
use crate::error::{DomainError, RepoError, ValidationErrors};
use crate::policy::{Owned, can_mutate, can_view_post};
use crate::ports::{
    BaseRepository, Clock, CommentRepository, PostRepository, Repositories, UserRepository,
};

/// Write side of the platform.
#[derive(Clone)]
pub struct MutationService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl MutationService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    pub async fn create_post(
        &self,
        viewer: &Viewer,
        input: PostInput,
    ) -> Result<Redirect, DomainError> {
        let Some(author_id) = viewer.id() else {
            return Ok(Redirect::Login);
        };
        // The token may predate a rename; the stored username is canonical.
        let author = self
            .repos
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", author_id))?;

        self.validate_post(&input).await?;
        let post = self.repos.posts.insert(Post::new(author.id, input)).await?;
        tracing::info!(post_id = %post.id, author = %author.username, "Post created");

        Ok(Redirect::Profile {
            username: author.username,
        })
    }

    pub async fn edit_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        input: PostInput,
    ) -> Result<Redirect, DomainError> {
        if !viewer.is_authenticated() {
            return Ok(Redirect::Login);
        }
        let mut post = self.load_post(post_id).await?;
        let back = Redirect::PostDetail { post_id };

        if !can_mutate(viewer, &post) {
            tracing::warn!(%post_id, %viewer, "Edit of foreign post ignored");
            return Ok(back);
        }

        self.validate_post(&input).await?;
        post.apply(input);
        self.repos
            .posts
            .update(post)
            .await
            .map_err(vanished("post", post_id))?;
        tracing::info!(%post_id, "Post updated");

        Ok(back)
    }

    pub async fn delete_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
    ) -> Result<Redirect, DomainError> {
        if !viewer.is_authenticated() {
            return Ok(Redirect::Login);
        }
        let post = self.load_post(post_id).await?;
        ensure_owner(viewer, &post)?;

        self.repos
            .posts
            .delete(post_id)
            .await
            .map_err(vanished("post", post_id))?;
        tracing::info!(%post_id, "Post deleted with its comments");

        Ok(Redirect::Feed)
    }

    /// Comment on a post the viewer can see. The target post always comes
    /// from the path.
    pub async fn create_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        input: CommentInput,
    ) -> Result<Redirect, DomainError> {
        let Some(author_id) = viewer.id() else {
            return Ok(Redirect::Login);
        };

        let post = self.load_post(post_id).await?;
        let category = match post.category_id {
            Some(id) => self.repos.categories.find_by_id(id).await?,
            None => None,
        };
        if !can_view_post(viewer, &post, category.as_ref(), self.clock.now()) {
            return Err(DomainError::not_found("post", post_id));
        }

        input.validate()?;
        let comment = self
            .repos
            .comments
            .insert(Comment::new(post.id, author_id, input.text))
            .await?;
        tracing::info!(%post_id, comment_id = %comment.id, "Comment created");

        Ok(Redirect::PostDetail { post_id })
    }

    pub async fn edit_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
        input: CommentInput,
    ) -> Result<Redirect, DomainError> {
        if !viewer.is_authenticated() {
            return Ok(Redirect::Login);
        }
        let mut comment = self.load_comment(post_id, comment_id).await?;
        ensure_owner(viewer, &comment)?;

        input.validate()?;
        comment.text = input.text;
        self.repos
            .comments
            .update(comment)
            .await
            .map_err(vanished("comment", comment_id))?;
        tracing::info!(%post_id, %comment_id, "Comment updated");

        Ok(Redirect::PostDetail { post_id })
    }

    pub async fn delete_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Redirect, DomainError> {
        if !viewer.is_authenticated() {
            return Ok(Redirect::Login);
        }
        let comment = self.load_comment(post_id, comment_id).await?;
        ensure_owner(viewer, &comment)?;

        self.repos
            .comments
            .delete(comment_id)
            .await
            .map_err(vanished("comment", comment_id))?;
        tracing::info!(%post_id, %comment_id, "Comment deleted");

        Ok(Redirect::PostDetail { post_id })
    }

    /// Update the viewer's own profile.
    pub async fn edit_profile(
        &self,
        viewer: &Viewer,
        input: ProfileInput,
    ) -> Result<Redirect, DomainError> {
        let Some(user_id) = viewer.id() else {
            return Ok(Redirect::Login);
        };
        let mut user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))?;

        input.validate()?;
        if input.username != user.username
            && self
                .repos
                .users
                .find_by_username(&input.username)
                .await?
                .is_some()
        {
            return Err(username_taken().into());
        }

        user.apply_profile(input);
        let user = self.repos.users.update(user).await.map_err(|err| match err {
            RepoError::Constraint(_) => DomainError::Validation(username_taken()),
            other => vanished("user", user_id)(other),
        })?;
        tracing::info!(%user_id, username = %user.username, "Profile updated");

        Ok(Redirect::Profile {
            username: user.username,
        })
    }

    async fn load_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    /// A comment addressed through a post it does not belong to is missing.
    async fn load_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    /// Field checks plus existence of the referenced category and location.
    async fn validate_post(&self, input: &PostInput) -> Result<(), DomainError> {
        let mut errors = input.validate();

        if let Some(id) = input.category_id {
            if self.repos.categories.find_by_id(id).await?.is_none() {
                errors.add("category", "Select a valid choice.");
            }
        }
        if let Some(id) = input.location_id {
            if self.repos.locations.find_by_id(id).await?.is_none() {
                errors.add("location", "Select a valid choice.");
            }
        }

        Ok(errors.into_result()?)
    }
}

fn ensure_owner<E: Owned>(viewer: &Viewer, entity: &E) -> Result<(), DomainError> {
    if can_mutate(viewer, entity) {
        Ok(())
    } else {
        tracing::warn!(%viewer, kind = E::KIND, "Mutation denied");
        Err(DomainError::Forbidden(E::KIND))
    }
}

fn username_taken() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("username", "A user with that username already exists.");
    errors
}
