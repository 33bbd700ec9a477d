//! Static content tables for the questionnaire.
//!
//! Source tables are written as sparse `(tag, weight)` pairs so they read like
//! the content they model. [`Registry::standard`] compiles them into dense
//! [`WeightVector`]s and fully populated category profiles, rejecting any tag
//! outside the category set or any profile missing report fields. A registry
//! that fails to compile must stop the process before a session can start.

mod bonuses;
mod profiles;
mod questions;

use super::domain::{Category, Choice, TimeBucket, Trouble, WeightVector};
use serde::Serialize;

pub(crate) type WeightSeed = &'static [(&'static str, u32)];

pub(crate) struct OptionSeed {
    pub label: &'static str,
    pub weights: WeightSeed,
}

pub(crate) struct QuestionSeed {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub a: OptionSeed,
    pub b: OptionSeed,
}

#[derive(Clone, Copy)]
pub(crate) struct ProfileSeed {
    pub tag: &'static str,
    pub name: &'static str,
    pub catch: &'static str,
    pub why: &'static str,
    pub stop: &'static [&'static str],
    pub today: &'static [&'static str],
    pub this_week: &'static [&'static str],
    pub this_month: &'static [&'static str],
    pub ai_use: &'static [&'static str],
}

/// Raw registry content prior to validation.
pub(crate) struct RegistrySeed<'a> {
    pub profiles: &'a [ProfileSeed],
    pub core: &'a [QuestionSeed],
    pub supplementary: &'a [(&'static str, QuestionSeed)],
    pub trouble_bonus: &'a [(Trouble, WeightSeed)],
    pub time_bonus: &'a [(TimeBucket, WeightSeed)],
}

impl RegistrySeed<'static> {
    pub(crate) fn standard() -> Self {
        Self {
            profiles: profiles::PROFILES,
            core: questions::CORE,
            supplementary: questions::SUPPLEMENTARY,
            trouble_bonus: bonuses::TROUBLE,
            time_bonus: bonuses::TIME,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    #[serde(skip)]
    pub weights: WeightVector,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    pub a: AnswerOption,
    pub b: AnswerOption,
}

impl Question {
    pub fn option(&self, choice: Choice) -> &AnswerOption {
        match choice {
            Choice::A => &self.a,
            Choice::B => &self.b,
        }
    }
}

/// Report copy for one archetype.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProfile {
    pub category: Category,
    pub name: &'static str,
    pub catch: &'static str,
    pub why: &'static str,
    pub stop: Vec<&'static str>,
    pub today: Vec<&'static str>,
    pub this_week: Vec<&'static str>,
    pub this_month: Vec<&'static str>,
    pub ai_use: Vec<&'static str>,
}

/// Validated, read-only questionnaire content.
#[derive(Debug, Clone)]
pub struct Registry {
    profiles: Vec<CategoryProfile>,
    core: Vec<Question>,
    supplementary: Vec<Option<Question>>,
    trouble_bonus: Vec<(Trouble, WeightVector)>,
    time_bonus: Vec<(TimeBucket, WeightVector)>,
}

impl Registry {
    /// Compiles the built-in content tables.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::compile(&RegistrySeed::standard())
    }

    pub(crate) fn compile(seed: &RegistrySeed<'_>) -> Result<Self, RegistryError> {
        let profiles = compile_profiles(seed.profiles)?;

        if seed.core.is_empty() {
            return Err(RegistryError::MissingQuestions);
        }
        let core = seed
            .core
            .iter()
            .map(compile_question)
            .collect::<Result<Vec<_>, _>>()?;

        let mut supplementary: Vec<Option<Question>> = vec![None; Category::COUNT];
        for (tag, question) in seed.supplementary {
            let category = parse_tag(tag, question.id)?;
            let slot = &mut supplementary[category.index()];
            if slot.is_some() {
                return Err(RegistryError::DuplicateCategory {
                    context: "supplementary".to_string(),
                    category,
                });
            }
            *slot = Some(compile_question(question)?);
        }

        let trouble_bonus = seed
            .trouble_bonus
            .iter()
            .map(|(trouble, weights)| Ok((*trouble, compile_weights(weights, trouble.key())?)))
            .collect::<Result<Vec<_>, RegistryError>>()?;
        let time_bonus = seed
            .time_bonus
            .iter()
            .map(|(bucket, weights)| Ok((*bucket, compile_weights(weights, bucket.key())?)))
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(Self {
            profiles,
            core,
            supplementary,
            trouble_bonus,
            time_bonus,
        })
    }

    pub fn profile(&self, category: Category) -> &CategoryProfile {
        &self.profiles[category.index()]
    }

    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    pub fn core_questions(&self) -> &[Question] {
        &self.core
    }

    /// The single supplementary question registered for `category`, if any.
    pub fn supplementary_for(&self, category: Category) -> Option<&Question> {
        self.supplementary[category.index()].as_ref()
    }

    pub fn supplementary_by_id(&self, id: &str) -> Option<&Question> {
        self.supplementary
            .iter()
            .flatten()
            .find(|question| question.id == id)
    }

    /// Bonus for a trouble selection; unlisted values contribute nothing.
    pub fn trouble_bonus(&self, trouble: Trouble) -> WeightVector {
        self.trouble_bonus
            .iter()
            .find(|(candidate, _)| *candidate == trouble)
            .map(|(_, weights)| *weights)
            .unwrap_or_default()
    }

    pub fn time_bonus(&self, bucket: TimeBucket) -> WeightVector {
        self.time_bonus
            .iter()
            .find(|(candidate, _)| *candidate == bucket)
            .map(|(_, weights)| *weights)
            .unwrap_or_default()
    }
}

fn parse_tag(tag: &str, context: &str) -> Result<Category, RegistryError> {
    Category::from_tag(tag).ok_or_else(|| RegistryError::InvalidCategory {
        context: context.to_string(),
        tag: tag.to_string(),
    })
}

fn compile_weights(
    seed: &[(&str, u32)],
    context: &str,
) -> Result<WeightVector, RegistryError> {
    let mut entries = Vec::with_capacity(seed.len());
    for (tag, weight) in seed {
        let category = parse_tag(tag, context)?;
        if entries.iter().any(|(seen, _)| *seen == category) {
            return Err(RegistryError::DuplicateCategory {
                context: context.to_string(),
                category,
            });
        }
        entries.push((category, *weight));
    }
    Ok(WeightVector::from_entries(&entries))
}

fn compile_question(seed: &QuestionSeed) -> Result<Question, RegistryError> {
    let option = |option: &OptionSeed, side: &str| -> Result<AnswerOption, RegistryError> {
        Ok(AnswerOption {
            label: option.label,
            weights: compile_weights(option.weights, &format!("{}.{side}", seed.id))?,
        })
    };

    Ok(Question {
        id: seed.id,
        title: seed.title,
        subtitle: seed.subtitle,
        a: option(&seed.a, "a")?,
        b: option(&seed.b, "b")?,
    })
}

fn compile_profiles(seeds: &[ProfileSeed]) -> Result<Vec<CategoryProfile>, RegistryError> {
    let mut slots: Vec<Option<CategoryProfile>> = vec![None; Category::COUNT];

    for seed in seeds {
        let category = parse_tag(seed.tag, "profiles")?;
        check_profile(category, seed)?;
        let slot = &mut slots[category.index()];
        if slot.is_some() {
            return Err(RegistryError::DuplicateCategory {
                context: "profiles".to_string(),
                category,
            });
        }
        *slot = Some(CategoryProfile {
            category,
            name: seed.name,
            catch: seed.catch,
            why: seed.why,
            stop: seed.stop.to_vec(),
            today: seed.today.to_vec(),
            this_week: seed.this_week.to_vec(),
            this_month: seed.this_month.to_vec(),
            ai_use: seed.ai_use.to_vec(),
        });
    }

    Category::ordered()
        .into_iter()
        .zip(slots)
        .map(|(category, slot)| {
            slot.ok_or(RegistryError::IncompleteCategoryMetadata {
                category,
                field: "profile",
            })
        })
        .collect()
}

fn check_profile(category: Category, seed: &ProfileSeed) -> Result<(), RegistryError> {
    let missing = |field: &'static str| RegistryError::IncompleteCategoryMetadata { category, field };
    let filled = |items: &[&str]| items.iter().all(|item| !item.trim().is_empty());

    if seed.name.trim().is_empty() {
        return Err(missing("name"));
    }
    if seed.catch.trim().is_empty() {
        return Err(missing("catch"));
    }
    if seed.why.trim().is_empty() {
        return Err(missing("why"));
    }
    if seed.stop.len() != 2 || !filled(seed.stop) {
        return Err(missing("stop"));
    }
    for (field, items) in [
        ("today", seed.today),
        ("this_week", seed.this_week),
        ("this_month", seed.this_month),
    ] {
        if items.is_empty() || !filled(items) {
            return Err(missing(field));
        }
    }
    if seed.ai_use.len() != 2 || !filled(seed.ai_use) {
        return Err(missing("ai_use"));
    }
    Ok(())
}

/// Data-integrity defects in the content tables. All are fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{context} references unknown category '{tag}'")]
    InvalidCategory { context: String, tag: String },
    #[error("{context} lists category {category} more than once")]
    DuplicateCategory { context: String, category: Category },
    #[error("category {category} is missing report field '{field}'")]
    IncompleteCategoryMetadata {
        category: Category,
        field: &'static str,
    },
    #[error("registry defines no mandatory questions")]
    MissingQuestions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(weights: WeightSeed) -> OptionSeed {
        OptionSeed {
            label: "option",
            weights,
        }
    }

    fn question(id: &'static str, a: WeightSeed) -> QuestionSeed {
        QuestionSeed {
            id,
            title: "title",
            subtitle: None,
            a: option(a),
            b: option(&[]),
        }
    }

    #[test]
    fn standard_registry_compiles() {
        let registry = Registry::standard().expect("built-in tables are well formed");
        assert_eq!(registry.core_questions().len(), 10);
        assert_eq!(registry.profiles().len(), Category::COUNT);
        for category in Category::ordered() {
            assert_eq!(registry.profile(category).category, category);
            let question = registry
                .supplementary_for(category)
                .expect("every category has a supplementary question");
            assert_eq!(question.a.weights.get(category), 3);
            assert!(question.b.weights.is_zero());
        }
    }

    #[test]
    fn standard_bonus_tables_match_context_signals() {
        let registry = Registry::standard().expect("registry");
        let tired = registry.trouble_bonus(Trouble::Tired);
        assert_eq!(tired.get(Category::Energy), 3);
        assert_eq!(tired.get(Category::Time), 1);
        assert_eq!(tired.get(Category::Motivation), 1);
        assert_eq!(tired.entries().count(), 3);

        let short = registry.time_bonus(TimeBucket::UpToFifteen);
        assert_eq!(short.get(Category::Time), 2);
        assert_eq!(short.get(Category::Priority), 1);
        assert!(registry.time_bonus(TimeBucket::HourOrMore).is_zero());
    }

    #[test]
    fn rejects_unknown_category_in_weights() {
        let core = [question("q1", &[("OVERTHNK", 2)])];
        let seed = RegistrySeed {
            core: &core,
            ..RegistrySeed::standard()
        };

        let err = Registry::compile(&seed).expect_err("typo is rejected");
        assert_eq!(
            err,
            RegistryError::InvalidCategory {
                context: "q1.a".to_string(),
                tag: "OVERTHNK".to_string(),
            }
        );
    }

    #[test]
    fn rejects_repeated_category_in_one_vector() {
        let core = [question("q1", &[("INFO", 1), ("INFO", 2)])];
        let seed = RegistrySeed {
            core: &core,
            ..RegistrySeed::standard()
        };

        let err = Registry::compile(&seed).expect_err("duplicate is rejected");
        assert!(matches!(
            err,
            RegistryError::DuplicateCategory {
                category: Category::Info,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_supplementary_category() {
        let supplementary = [("SLEEPY", question("ex_sleepy_1", &[]))];
        let seed = RegistrySeed {
            supplementary: &supplementary,
            ..RegistrySeed::standard()
        };

        assert!(matches!(
            Registry::compile(&seed),
            Err(RegistryError::InvalidCategory { ref tag, .. }) if tag == "SLEEPY"
        ));
    }

    #[test]
    fn rejects_second_supplementary_question_for_a_category() {
        let supplementary = [
            ("ENERGY", question("ex_energy_1", &[("ENERGY", 3)])),
            ("ENERGY", question("ex_energy_2", &[("ENERGY", 3)])),
        ];
        let seed = RegistrySeed {
            supplementary: &supplementary,
            ..RegistrySeed::standard()
        };

        assert_eq!(
            Registry::compile(&seed).expect_err("one question per category"),
            RegistryError::DuplicateCategory {
                context: "supplementary".to_string(),
                category: Category::Energy,
            }
        );
    }

    #[test]
    fn rejects_repeated_profile() {
        let mut repeated = profiles::PROFILES.to_vec();
        repeated.push(ProfileSeed {
            name: "Second opinion",
            ..profiles::PROFILES[2]
        });
        let seed = RegistrySeed {
            profiles: &repeated,
            ..RegistrySeed::standard()
        };

        assert_eq!(
            Registry::compile(&seed).expect_err("profile tags are unique"),
            RegistryError::DuplicateCategory {
                context: "profiles".to_string(),
                category: Category::Info,
            }
        );
    }

    #[test]
    fn rejects_missing_profile() {
        let seed = RegistrySeed {
            profiles: &profiles::PROFILES[..7],
            ..RegistrySeed::standard()
        };

        let err = Registry::compile(&seed).expect_err("missing profile is fatal");
        assert_eq!(
            err,
            RegistryError::IncompleteCategoryMetadata {
                category: Category::Motivation,
                field: "profile",
            }
        );
    }

    #[test]
    fn rejects_profile_with_single_stop_item() {
        let broken = [ProfileSeed {
            stop: &["Only one"],
            ..profiles::PROFILES[0]
        }];
        let seed = RegistrySeed {
            profiles: &broken,
            ..RegistrySeed::standard()
        };

        let err = Registry::compile(&seed).expect_err("stop list must have two items");
        assert_eq!(
            err,
            RegistryError::IncompleteCategoryMetadata {
                category: Category::Overthink,
                field: "stop",
            }
        );
    }

    #[test]
    fn rejects_empty_action_block() {
        let broken = [ProfileSeed {
            this_month: &[],
            ..profiles::PROFILES[4]
        }];
        let seed = RegistrySeed {
            profiles: &broken,
            ..RegistrySeed::standard()
        };

        assert!(matches!(
            Registry::compile(&seed),
            Err(RegistryError::IncompleteCategoryMetadata {
                category: Category::Energy,
                field: "this_month",
            })
        ));
    }

    #[test]
    fn rejects_empty_question_set() {
        let seed = RegistrySeed {
            core: &[],
            ..RegistrySeed::standard()
        };
        assert_eq!(
            Registry::compile(&seed).expect_err("no questions"),
            RegistryError::MissingQuestions
        );
    }
}
