//! The CV record data model.
//!
//! A [`CVRecord`] is the single live instance of the user's CV content:
//! personal information, repeatable sections (formations, experiences,
//! languages, certifications, references), skills, and interests. The record
//! carries no behavior beyond construction helpers; editing replaces the whole
//! record rather than patching fields in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque entry id.
///
/// Entry ids are client-generated tokens, stable across edits; they key
/// repeatable-section entries for list rendering and deletion.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// Personal information block. All fields optional (may be empty strings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Displayed job title
    pub job_title: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Age, kept as entered
    pub age: String,
    /// Driving license text
    pub license: String,
    /// Photo as a data URI (empty when no photo was uploaded)
    pub photo: String,
    /// Profile summary paragraph
    pub profile: String,
}

/// An education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// Opaque entry id
    pub id: String,
    /// Degree or program title (primary field; blank entries are skipped)
    pub title: String,
    /// Period string as entered, e.g. "2021 - 2023"
    pub period: String,
    /// Free-text description
    pub description: String,
}

/// A professional experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Opaque entry id
    pub id: String,
    /// Position title (primary field; blank entries are skipped)
    pub title: String,
    /// Company or organization
    pub company: String,
    /// Period string as entered
    pub period: String,
    /// Free-text description; newline-separated lines render as bullets
    pub description: String,
}

/// Language proficiency levels offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    /// Beginner
    Debutant,
    /// Intermediate
    Intermediaire,
    /// Fluent
    Courant,
    /// School level
    NiveauScolaire,
    /// Bilingual
    Bilingue,
    /// Native
    Natif,
}

impl Proficiency {
    /// Display label, matching the editor's option list.
    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Debutant => "Débutant",
            Proficiency::Intermediaire => "Intermédiaire",
            Proficiency::Courant => "Courant",
            Proficiency::NiveauScolaire => "Niveau scolaire",
            Proficiency::Bilingue => "Bilingue",
            Proficiency::Natif => "Natif",
        }
    }
}

/// A spoken language entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Opaque entry id
    pub id: String,
    /// Language name (primary field; blank entries are skipped)
    pub name: String,
    /// Proficiency level
    pub level: Proficiency,
}

/// A certification entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    /// Opaque entry id
    pub id: String,
    /// Certification name (primary field; blank entries are skipped)
    pub name: String,
}

/// A reference entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Opaque entry id
    pub id: String,
    /// Referee name (primary field; blank entries are skipped)
    pub name: String,
    /// Referee title or role
    pub title: String,
}

/// Skill lists, split between soft and hard skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    /// Interpersonal skills
    pub soft_skills: Vec<String>,
    /// Technical skills
    pub hard_skills: Vec<String>,
}

/// The root CV record. Single live instance, replaced wholesale on edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CVRecord {
    /// Personal information block
    pub personal: PersonalInfo,
    /// Education entries, in display order
    pub formations: Vec<Formation>,
    /// Experience entries, in display order
    pub experiences: Vec<Experience>,
    /// Language entries, in display order
    pub languages: Vec<Language>,
    /// Certification entries, in display order
    pub certifications: Vec<Certification>,
    /// Reference entries, in display order
    pub references: Vec<Reference>,
    /// Skill lists
    pub skills: Skills,
    /// Interests, derived from comma-separated input
    pub interests: Vec<String>,
}

impl CVRecord {
    /// An entirely empty record (zero entries in every section).
    pub fn new() -> Self {
        Self::default()
    }

    /// The record the editor starts from: one blank entry per repeatable
    /// section, so each form step shows an editable row immediately.
    pub fn with_placeholders() -> Self {
        Self {
            formations: vec![Formation {
                id: new_entry_id(),
                ..Formation::default()
            }],
            experiences: vec![Experience {
                id: new_entry_id(),
                ..Experience::default()
            }],
            languages: vec![Language {
                id: new_entry_id(),
                name: String::new(),
                level: Proficiency::Courant,
            }],
            certifications: vec![Certification {
                id: new_entry_id(),
                ..Certification::default()
            }],
            references: vec![Reference {
                id: new_entry_id(),
                ..Reference::default()
            }],
            ..Self::default()
        }
    }

    /// A fully populated example record, used by the "load example" action.
    pub fn example() -> Self {
        Self {
            personal: PersonalInfo {
                first_name: "Sacha".to_string(),
                last_name: "Diarra".to_string(),
                job_title: "Chargée de communication".to_string(),
                email: "hello@reallygreatsite.com".to_string(),
                phone: "+225-456-7890".to_string(),
                address: "123 Anywhere St., City".to_string(),
                age: "24".to_string(),
                license: "Permis B - Véhicule".to_string(),
                photo: String::new(),
                profile: "Passionnée par la communication et le marketing digital, \
                          je possède une expérience en gestion de projets, création \
                          de contenu et stratégies de médias sociaux. Ma créativité \
                          et mon sens de l'organisation sont mes atouts dans le \
                          développement de campagnes impactantes."
                    .to_string(),
            },
            formations: vec![
                Formation {
                    id: new_entry_id(),
                    title: "Master Communication".to_string(),
                    period: "2021 - 2023".to_string(),
                    description: "Spécialisation en communication digitale et médias sociaux."
                        .to_string(),
                },
                Formation {
                    id: new_entry_id(),
                    title: "Licence Marketing et Communication".to_string(),
                    period: "2020 - 2021".to_string(),
                    description: "Participation à un projet collectif de création d'une \
                                  campagne publicitaire."
                        .to_string(),
                },
            ],
            experiences: vec![
                Experience {
                    id: new_entry_id(),
                    title: "Chargée de communication et marketing".to_string(),
                    company: "Nom de l'entreprise - Any City".to_string(),
                    period: "2021 - 2023".to_string(),
                    description: "• Gestion et optimisation des campagnes publicitaires \
                                  sur les réseaux sociaux\n\
                                  • Création de contenu visuel et rédactionnel engageant\n\
                                  • Analyse des données de performance et ajustement des \
                                  stratégies marketing"
                        .to_string(),
                },
                Experience {
                    id: new_entry_id(),
                    title: "Community Manager".to_string(),
                    company: "Nom de l'entreprise - Any City".to_string(),
                    period: "2020 - 2021".to_string(),
                    description: "• Planification et exécution d'événements médiatiques\n\
                                  • Rédaction de communiqués de presse et gestion des \
                                  relations presse\n\
                                  • Développement de relations avec les influenceurs et \
                                  partenaires"
                        .to_string(),
                },
            ],
            languages: vec![
                Language {
                    id: new_entry_id(),
                    name: "Français".to_string(),
                    level: Proficiency::Courant,
                },
                Language {
                    id: new_entry_id(),
                    name: "Anglais".to_string(),
                    level: Proficiency::Courant,
                },
                Language {
                    id: new_entry_id(),
                    name: "Espagnol".to_string(),
                    level: Proficiency::NiveauScolaire,
                },
            ],
            certifications: vec![
                Certification {
                    id: new_entry_id(),
                    name: "Google Analytics Certified".to_string(),
                },
                Certification {
                    id: new_entry_id(),
                    name: "Facebook Marketing Professional".to_string(),
                },
            ],
            references: vec![
                Reference {
                    id: new_entry_id(),
                    name: "Shella Bawar".to_string(),
                    title: "Tesda Trainer".to_string(),
                },
                Reference {
                    id: new_entry_id(),
                    name: "Maria Encarnacion Rojo".to_string(),
                    title: "General Manager".to_string(),
                },
            ],
            skills: Skills {
                soft_skills: vec![
                    "Esprit d'équipe".to_string(),
                    "Rigoureuse".to_string(),
                    "Organisée".to_string(),
                ],
                hard_skills: vec![
                    "Marketing Digital".to_string(),
                    "Réseaux Sociaux".to_string(),
                    "Google Analytics".to_string(),
                    "Créativité".to_string(),
                ],
            },
            interests: vec![
                "🎵 Musique".to_string(),
                "✈️ Voyage".to_string(),
                "⚽ Sport".to_string(),
                "🧵 Couture".to_string(),
            ],
        }
    }

    /// Whether every section of this record is devoid of displayable content.
    pub fn is_blank(&self) -> bool {
        let p = &self.personal;
        p.first_name.trim().is_empty()
            && p.last_name.trim().is_empty()
            && p.job_title.trim().is_empty()
            && p.profile.trim().is_empty()
            && self.formations.iter().all(|f| f.title.trim().is_empty())
            && self.experiences.iter().all(|e| e.title.trim().is_empty())
            && self.languages.iter().all(|l| l.name.trim().is_empty())
            && self.certifications.iter().all(|c| c.name.trim().is_empty())
            && self.references.iter().all(|r| r.name.trim().is_empty())
            && self.skills.soft_skills.is_empty()
            && self.skills.hard_skills.is_empty()
            && self.interests.is_empty()
    }
}

/// Split free text on commas into trimmed, non-empty tokens.
///
/// This is the derivation used for skills and interests input: surrounding
/// whitespace is trimmed and empty tokens are dropped.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
