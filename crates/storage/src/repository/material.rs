use std::collections::HashMap;

use uuid::Uuid;

use super::Repository;
use crate::document::{Collection, Stored};
use crate::dto::common::IntoModel;
use crate::dto::material::{
    AuthorInfo, LikeResponse, MaterialList, MaterialRequest, MaterialResponse,
    MaterialSearchQuery, RecentMaterialsQuery, SecondaryMaterials,
};
use crate::error::{Result, StorageError};
use crate::models::{Comment, Competition, Material, MaterialType, User, material};
use crate::query::{Accessor, ListParams, Predicate, QueryPlan, Sort, SortOrder};
use crate::services::league::league_materials;
use crate::store::DocumentStore;

/// Which shape materials are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Full,
    Preview,
}

/// Repository for Material documents
pub struct MaterialRepository<'a> {
    store: &'a dyn DocumentStore,
    materials: Repository<'a, Material>,
}

impl<'a> MaterialRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            materials: Repository::new(store),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<MaterialList> {
        let page = self.materials.list(params).await?;
        Ok(MaterialList {
            materials: self.populate(page.items, Shape::Preview).await?,
            materials_count: page.total,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<MaterialResponse> {
        let material = self.materials.find_by_id(id).await?;
        self.single(material).await
    }

    /// The material flagged `isMain`.
    pub async fn main(&self) -> Result<MaterialResponse> {
        let material = self
            .materials
            .find_one(material::is_main())
            .await?
            .ok_or(StorageError::NotFound(Collection::Materials))?;
        self.single(material).await
    }

    /// Most recently published materials of the requested types; all types
    /// when none are given.
    pub async fn recent(&self, query: &RecentMaterialsQuery) -> Result<Vec<MaterialResponse>> {
        let predicate = if query.material_types.is_empty() {
            Predicate::always()
        } else {
            material::of_types(&query.material_types)
        };
        let plan = QueryPlan::new(predicate)
            .with_sort(newest_published())
            .limit(query.materials_number);

        let page = self.materials.query(&plan).await?;
        self.populate(page.items, Shape::Preview).await
    }

    /// The homepage's secondary block: most viewed articles and notes, the
    /// newest posts and every material grouped by league.
    pub async fn secondary(&self, top_materials: u64, posts: u64) -> Result<SecondaryMaterials> {
        let top_plan = QueryPlan::new(material::of_types(&[
            MaterialType::Article,
            MaterialType::Note,
        ]))
        .with_sort(Sort::new(Accessor::number("views"), SortOrder::Desc))
        .limit(top_materials);
        let top = self.materials.query(&top_plan).await?;

        let posts_plan = QueryPlan::new(material::of_types(&[MaterialType::Post]))
            .with_sort(newest_published())
            .limit(posts);
        let posts = self.materials.query(&posts_plan).await?;

        let everything = self.populate(self.materials.all().await?, Shape::Preview).await?;
        let competitions = Repository::<Competition>::new(self.store).all().await?;

        Ok(SecondaryMaterials {
            top_materials: self.populate(top.items, Shape::Preview).await?,
            posts: self.populate(posts.items, Shape::Preview).await?,
            league_materials: league_materials(&competitions, &everything),
        })
    }

    /// Materials whose title or one of whose labels contains the search
    /// value, newest first.
    pub async fn search(&self, query: &MaterialSearchQuery) -> Result<Vec<MaterialResponse>> {
        if query.value.is_empty() {
            return Ok(Vec::new());
        }

        let mut predicate = material::label_or_title_search(&query.value);
        if !query.types.is_empty() {
            predicate = predicate.and(material::of_types(&query.types));
        }
        let plan = QueryPlan::new(predicate)
            .with_sort(newest_published())
            .limit(query.materials_num);

        let page = self.materials.query(&plan).await?;
        self.populate(page.items, Shape::Preview).await
    }

    /// Creating a material flagged `isMain` unflags the previous one.
    pub async fn create(&self, request: MaterialRequest) -> Result<MaterialResponse> {
        let material = request.into_model()?;
        self.ensure_author(&material).await?;
        let created = self.materials.create(&material).await?;
        self.single(created).await
    }

    pub async fn update(&self, id: Uuid, request: MaterialRequest) -> Result<MaterialResponse> {
        let material = request.into_model()?;
        self.ensure_author(&material).await?;
        let updated = self.materials.replace(id, &material).await?;
        self.single(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.materials.delete(id).await
    }

    pub async fn toggle_like(&self, id: Uuid, user: Uuid) -> Result<LikeResponse> {
        let updated = self
            .materials
            .modify(id, |material| {
                material.toggle_like(user);
            })
            .await?;
        let liked = updated.doc.likes.contains(&user);

        tracing::debug!(material = %id, %user, liked, "Toggled like");
        Ok(LikeResponse {
            liked,
            likes: updated.doc.likes.len() as u64,
        })
    }

    pub async fn add_comment(&self, id: Uuid, user: Uuid, message: String) -> Result<MaterialResponse> {
        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(StorageError::Validation(
                "Comment must have a message".to_string(),
            ));
        }

        let updated = self
            .materials
            .modify(id, |material| {
                material.comments.push(Comment {
                    user,
                    message: message.clone(),
                });
            })
            .await?;
        self.single(updated).await
    }

    async fn ensure_author(&self, material: &Material) -> Result<()> {
        Repository::<User>::new(self.store)
            .find_by_id(material.author)
            .await
            .map(|_| ())
    }

    async fn single(&self, material: Stored<Material>) -> Result<MaterialResponse> {
        self.populate(vec![material], Shape::Full)
            .await?
            .pop()
            .ok_or(StorageError::NotFound(Collection::Materials))
    }

    /// Materials by id, in the given order, as previews. Missing ids are
    /// skipped.
    pub async fn previews(&self, ids: &[Uuid]) -> Result<Vec<MaterialResponse>> {
        let materials = self.materials.find_many(ids).await?;
        self.populate(materials, Shape::Preview).await
    }

    async fn populate(
        &self,
        materials: Vec<Stored<Material>>,
        shape: Shape,
    ) -> Result<Vec<MaterialResponse>> {
        let author_ids: Vec<Uuid> = materials.iter().map(|m| m.doc.author).collect();
        let authors: HashMap<Uuid, AuthorInfo> = Repository::<User>::new(self.store)
            .find_map(&author_ids)
            .await?
            .into_iter()
            .map(|(id, user)| (id, AuthorInfo::from(user)))
            .collect();

        Ok(materials
            .into_iter()
            .map(|material| {
                let author = authors.get(&material.doc.author).cloned();
                match shape {
                    Shape::Full => MaterialResponse::full(material, author),
                    Shape::Preview => MaterialResponse::preview(material, author),
                }
            })
            .collect())
    }
}

fn newest_published() -> Sort {
    Sort::new(Accessor::time("publicationDate"), SortOrder::Desc)
}
