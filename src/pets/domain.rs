use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a pet record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PetId(pub u64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a success story.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StoryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetSpecies {
    Dog,
    Cat,
    Rabbit,
    Bird,
}

impl PetSpecies {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
            Self::Bird => "Bird",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dog" => Some(Self::Dog),
            "cat" => Some(Self::Cat),
            "rabbit" => Some(Self::Rabbit),
            "bird" => Some(Self::Bird),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetSize {
    Small,
    Medium,
    Large,
}

impl PetSize {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetGender {
    Male,
    Female,
}

impl PetGender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Availability of a pet. Adoption-driven changes flow exclusively through
/// the lifecycle coordinator; staff edits go through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    Available,
    Pending,
    Adopted,
}

impl PetStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Adopted => "adopted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "pending" => Some(Self::Pending),
            "adopted" => Some(Self::Adopted),
            _ => None,
        }
    }
}

/// Medical record flags surfaced on pet profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalFlags {
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub spayed_neutered: bool,
    #[serde(default)]
    pub microchipped: bool,
    #[serde(default)]
    pub special_needs: bool,
    #[serde(default)]
    pub special_needs_description: Option<String>,
}

/// Up to three image paths; the main image leads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetImages {
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub image_2: Option<String>,
    #[serde(default)]
    pub image_3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub slug: String,
    pub species: PetSpecies,
    pub breed: String,
    pub age: String,
    pub gender: PetGender,
    pub size: PetSize,
    pub color: String,
    pub description: String,
    pub personality: Vec<String>,
    pub medical: MedicalFlags,
    pub images: PetImages,
    pub status: PetStatus,
    pub arrival_date: NaiveDate,
    pub adoption_fee_cents: u32,
    pub featured: bool,
}

impl Pet {
    /// All populated image paths, main image first.
    pub fn all_images(&self) -> Vec<&str> {
        [
            self.images.main_image.as_deref(),
            self.images.image_2.as_deref(),
            self.images.image_3.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Arrived within the last 30 days.
    pub fn is_new_arrival(&self, today: NaiveDate) -> bool {
        (today - self.arrival_date).num_days() <= 30
    }

    /// Badge text shown on listings. Special needs wins over new arrival.
    pub fn badge(&self, today: NaiveDate) -> Option<&'static str> {
        if self.medical.special_needs {
            Some("Special Needs")
        } else if self.is_new_arrival(today) {
            Some("New Arrival")
        } else {
            None
        }
    }
}

/// Intake data for a new pet record. A missing slug is derived from the name.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPet {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub species: PetSpecies,
    pub breed: String,
    pub age: String,
    pub gender: PetGender,
    pub size: PetSize,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub medical: MedicalFlags,
    #[serde(default)]
    pub images: PetImages,
    pub arrival_date: NaiveDate,
    #[serde(default)]
    pub adoption_fee_cents: u32,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update covering every staff-editable field. Status is absent on
/// purpose; it moves only through `PetRegistry::set_status` or the lifecycle
/// coordinator. Unknown fields are rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PetUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub personality: Option<Vec<String>>,
    #[serde(default)]
    pub medical: Option<MedicalFlags>,
    #[serde(default)]
    pub images: Option<PetImages>,
    #[serde(default)]
    pub arrival_date: Option<NaiveDate>,
    #[serde(default)]
    pub adoption_fee_cents: Option<u32>,
    #[serde(default)]
    pub featured: Option<bool>,
}

impl PetUpdate {
    pub fn apply(self, pet: &mut Pet) {
        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(breed) = self.breed {
            pet.breed = breed;
        }
        if let Some(age) = self.age {
            pet.age = age;
        }
        if let Some(color) = self.color {
            pet.color = color;
        }
        if let Some(description) = self.description {
            pet.description = description;
        }
        if let Some(personality) = self.personality {
            pet.personality = personality;
        }
        if let Some(medical) = self.medical {
            pet.medical = medical;
        }
        if let Some(images) = self.images {
            pet.images = images;
        }
        if let Some(arrival_date) = self.arrival_date {
            pet.arrival_date = arrival_date;
        }
        if let Some(fee) = self.adoption_fee_cents {
            pet.adoption_fee_cents = fee;
        }
        if let Some(featured) = self.featured {
            pet.featured = featured;
        }
    }
}

/// Browse filters over available pets.
#[derive(Debug, Clone, Default)]
pub struct PetFilters {
    pub species: Option<PetSpecies>,
    pub sizes: Vec<PetSize>,
    pub special_needs: bool,
    pub search: Option<String>,
}

impl PetFilters {
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(species) = self.species {
            if pet.species != species {
                return false;
            }
        }
        if !self.sizes.is_empty() && !self.sizes.contains(&pet.size) {
            return false;
        }
        if self.special_needs && !pet.medical.special_needs {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystacks = [&pet.name, &pet.breed, &pet.description];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

/// Listing order. The default matches arrival-date-descending, name as the
/// tiebreaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetSort {
    #[default]
    Newest,
    Oldest,
    Name,
}

impl PetSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Pet counts grouped by availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PetStatusCounts {
    pub available: usize,
    pub pending: usize,
    pub adopted: usize,
}

/// A published adoption success story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: StoryId,
    pub pet: Option<PetId>,
    pub adopter_name: String,
    pub adoption_date: NaiveDate,
    pub title: String,
    pub story: String,
    pub image: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSuccessStory {
    #[serde(default)]
    pub pet: Option<PetId>,
    pub adopter_name: String,
    pub adoption_date: NaiveDate,
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
}
