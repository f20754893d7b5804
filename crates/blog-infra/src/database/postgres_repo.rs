//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Category, Comment, Location, PostRecord, PostRelations, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostQuery, PostRepository,
    PostScope, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err, map_txn_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    let post_ids: Vec<Uuid> = PostEntity::find()
                        .select_only()
                        .column(post::Column::Id)
                        .filter(post::Column::AuthorId.eq(id))
                        .into_tuple()
                        .all(txn)
                        .await?;

                    CommentEntity::delete_many()
                        .filter(
                            Condition::any()
                                .add(comment::Column::AuthorId.eq(id))
                                .add(comment::Column::PostId.is_in(post_ids)),
                        )
                        .exec(txn)
                        .await?;
                    PostEntity::delete_many()
                        .filter(post::Column::AuthorId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = UserEntity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("user {id}")));
                    }
                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        tracing::info!(user_id = %id, "User deleted with posts and comments");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    PostEntity::update_many()
                        .col_expr(post::Column::CategoryId, Expr::value(Option::<Uuid>::None))
                        .filter(post::Column::CategoryId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = CategoryEntity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("category {id}")));
                    }
                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Location>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = LocationEntity::find()
            .filter(location::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    PostEntity::update_many()
                        .col_expr(post::Column::LocationId, Expr::value(Option::<Uuid>::None))
                        .filter(post::Column::LocationId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = LocationEntity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("location {id}")));
                    }
                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)
    }
}

impl PostgresPostRepository {
    async fn load_relations(&self, records: &mut [PostRecord]) -> Result<(), RepoError> {
        let mut author_ids: Vec<Uuid> = records.iter().map(|r| r.post.author_id).collect();
        let mut category_ids: Vec<Uuid> =
            records.iter().filter_map(|r| r.post.category_id).collect();
        let mut location_ids: Vec<Uuid> =
            records.iter().filter_map(|r| r.post.location_id).collect();
        for ids in [&mut author_ids, &mut category_ids, &mut location_ids] {
            ids.sort();
            ids.dedup();
        }

        let authors: HashMap<Uuid, User> = find_models::<UserEntity, _>(
            &self.db,
            user::Column::Id,
            &author_ids,
        )
        .await?;
        let categories: HashMap<Uuid, Category> = find_models::<CategoryEntity, _>(
            &self.db,
            category::Column::Id,
            &category_ids,
        )
        .await?;
        let locations: HashMap<Uuid, Location> = find_models::<LocationEntity, _>(
            &self.db,
            location::Column::Id,
            &location_ids,
        )
        .await?;

        for record in records.iter_mut() {
            let post = &record.post;
            record.relations = Some(PostRelations {
                author: authors.get(&post.author_id).cloned(),
                category: post.category_id.and_then(|id| categories.get(&id).cloned()),
                location: post.location_id.and_then(|id| locations.get(&id).cloned()),
            });
        }
        Ok(())
    }

    async fn load_comment_counts(&self, records: &mut [PostRecord]) -> Result<(), RepoError> {
        let ids: Vec<Uuid> = records.iter().map(|r| r.post.id).collect();
        let counts: HashMap<Uuid, i64> = if ids.is_empty() {
            HashMap::new()
        } else {
            CommentEntity::find()
                .select_only()
                .column(comment::Column::PostId)
                .column_as(Expr::col(comment::Column::Id).count(), "comment_count")
                .filter(comment::Column::PostId.is_in(ids))
                .group_by(comment::Column::PostId)
                .into_tuple::<(Uuid, i64)>()
                .all(&self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .collect()
        };

        for record in records.iter_mut() {
            let count = counts.get(&record.post.id).copied().unwrap_or(0);
            record.comment_count = Some(count.max(0) as u64);
        }
        Ok(())
    }
}

/// Load the rows of `E` whose `column` is in `ids`, keyed by ID.
async fn find_models<E, T>(
    db: &sea_orm::DbConn,
    column: E::Column,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, T>, RepoError>
where
    E: EntityTrait,
    T: From<E::Model> + HasId + Send,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = E::find()
        .filter(column.is_in(ids.iter().copied()))
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(models
        .into_iter()
        .map(T::from)
        .map(|t| (t.id(), t))
        .collect())
}

trait HasId {
    fn id(&self) -> Uuid;
}

impl HasId for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Location {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn fetch(&self, query: PostQuery) -> Result<Vec<PostRecord>, RepoError> {
        tracing::debug!(?query, "Fetching posts");

        let select = match query.scope {
            PostScope::All => PostEntity::find(),
            PostScope::Category(id) => PostEntity::find().filter(post::Column::CategoryId.eq(id)),
            PostScope::Author(id) => PostEntity::find().filter(post::Column::AuthorId.eq(id)),
        };
        let models = select
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut records: Vec<PostRecord> = models
            .into_iter()
            .map(|m| PostRecord::bare(m.into()))
            .collect();
        if query.with_relations {
            self.load_relations(&mut records).await?;
        }
        if query.with_comment_count {
            self.load_comment_counts(&mut records).await?;
        }

        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    CommentEntity::delete_many()
                        .filter(comment::Column::PostId.eq(id))
                        .exec(txn)
                        .await?;

                    let result = PostEntity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("post {id}")));
                    }
                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = CommentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
