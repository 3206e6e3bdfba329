//! Randomized localization cases.
//!
//! A case shows a sample of abnormal muscles from one lesion's list, a sample
//! of normal muscles from the same region that are not on that list, and four
//! candidate lesions. Distractors come from the same region, preferring the
//! same category.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;
use std::sync::Arc;

use crate::anatomy::{Catalog, Category, LesionId, LesionPattern, MuscleId, Region, RegionScope};
use crate::config::EngineConfig;
use crate::error::CaseError;
use crate::observability::metrics;

/// Number of answer options per case, the correct lesion included.
pub const ANSWER_OPTIONS: usize = 4;

/// Which lesions may be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseFilter {
    /// Enabled categories.
    pub categories: Vec<Category>,
    /// Region filter.
    pub scope: RegionScope,
}

impl CaseFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(categories: Vec<Category>, scope: RegionScope) -> Self {
        Self { categories, scope }
    }

    /// Every category, in `scope`.
    #[must_use]
    pub fn all_categories(scope: RegionScope) -> Self {
        Self::new(Category::all().to_vec(), scope)
    }
}

/// One localization question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    /// The lesion the findings were drawn from.
    pub correct_lesion: LesionId,
    /// Muscles showing denervation, all from the lesion's list.
    pub abnormal_muscles: Vec<MuscleId>,
    /// Muscles with a normal study, none from the lesion's list.
    pub normal_muscles: Vec<MuscleId>,
    /// Candidate lesions in display order; contains `correct_lesion`.
    pub options: Vec<LesionId>,
    /// Region of the lesion and of every muscle shown.
    pub region: Region,
}

impl Case {
    /// Returns `true` if `lesion` is one of the options.
    #[must_use]
    pub fn is_option(&self, lesion: &str) -> bool {
        self.options.iter().any(|o| o == lesion)
    }
}

/// Builds cases from the lesion catalog.
#[derive(Debug, Clone)]
pub struct CaseGenerator {
    catalog: Arc<Catalog>,
    abnormal_sample_size: usize,
    normal_sample_size: usize,
}

impl CaseGenerator {
    /// Creates a generator using the sample sizes in `config`.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, config: &EngineConfig) -> Self {
        Self {
            catalog,
            abnormal_sample_size: config.abnormal_sample_size,
            normal_sample_size: config.normal_sample_size,
        }
    }

    /// The catalog cases are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Draws a case.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::NoLesionAvailable` if no lesion passes `filter`.
    pub fn generate_case<R: Rng + ?Sized>(
        &self,
        filter: &CaseFilter,
        rng: &mut R,
    ) -> Result<Case, CaseError> {
        let pool: Vec<&LesionPattern> = self
            .catalog
            .lesions()
            .filtered(&filter.categories, filter.scope)
            .collect();

        let Some(lesion) = pool.choose(rng).copied() else {
            metrics::record_case_generation_failure();
            tracing::debug!(
                categories = ?filter.categories,
                scope = %filter.scope,
                "no lesion matches filter"
            );
            return Err(CaseError::NoLesionAvailable {
                categories: filter.categories.clone(),
                scope: filter.scope,
            });
        };

        let abnormal_muscles: Vec<MuscleId> = lesion
            .muscles
            .choose_multiple(rng, self.abnormal_sample_size)
            .cloned()
            .collect();

        let normal_pool: Vec<&MuscleId> = self
            .catalog
            .muscles_by_region(lesion.region)
            .into_iter()
            .map(|m| &m.id)
            .filter(|id| !lesion.involves(id.as_str()))
            .collect();
        let normal_muscles: Vec<MuscleId> = normal_pool
            .choose_multiple(rng, self.normal_sample_size)
            .map(|id| (*id).clone())
            .collect();

        let options = self.answer_options(lesion, rng);

        tracing::debug!(
            lesion = %lesion.id,
            pool = pool.len(),
            normal_pool = normal_pool.len(),
            "generated case"
        );
        metrics::record_case_generated();

        Ok(Case {
            correct_lesion: lesion.id.clone(),
            abnormal_muscles,
            normal_muscles,
            options,
            region: lesion.region,
        })
    }

    /// The correct lesion plus up to three same-region distractors, same
    /// category first, shuffled.
    fn answer_options<R: Rng + ?Sized>(&self, lesion: &LesionPattern, rng: &mut R) -> Vec<LesionId> {
        let (mut same, mut other): (Vec<&LesionPattern>, Vec<&LesionPattern>) = self
            .catalog
            .lesions()
            .lesions()
            .filter(|l| l.region == lesion.region && l.id != lesion.id)
            .partition(|l| l.category == lesion.category);
        same.shuffle(rng);
        other.shuffle(rng);

        let mut options: Vec<LesionId> = std::iter::once(&lesion.id)
            .chain(same.into_iter().chain(other).map(|l| &l.id))
            .take(ANSWER_OPTIONS)
            .cloned()
            .collect();
        options.shuffle(rng);
        options
    }
}
