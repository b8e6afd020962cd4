use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::adoptions::{
    AdoptionApplication, ApplicationFilters, ApplicationId, ApplicationStatus, UserId,
};
use crate::contact::{ContactMessage, MessageFilters, MessageId, NewMessage};
use crate::pets::{
    NewPet, NewSuccessStory, Pet, PetFilters, PetId, PetSort, PetStatus, PetStatusCounts,
    PetUpdate, StoryId, SuccessStory,
};
use crate::repository::RepositoryError;

use crate::adoptions::repository::{ApplicationRepository, NewApplication, StatusTransition};
use crate::contact::repository::ContactRepository;
use crate::pets::repository::{PetRepository, PetStatusWriter, StoryRepository};

#[derive(Default)]
struct StoreState {
    pets: BTreeMap<PetId, Pet>,
    applications: BTreeMap<ApplicationId, AdoptionApplication>,
    messages: BTreeMap<MessageId, ContactMessage>,
    stories: BTreeMap<StoryId, SuccessStory>,
    pet_sequence: u64,
    application_sequence: u64,
    message_sequence: u64,
    story_sequence: u64,
}

/// In-memory record store backing every repository trait. One lock covers
/// all collections, so a status transition and its pet side effect can never
/// interleave with another writer on the same records.
#[derive(Default)]
pub struct MemoryShelterStore {
    state: Mutex<StoreState>,
}

impl MemoryShelterStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store mutex poisoned")
    }
}

fn next(sequence: &mut u64) -> u64 {
    *sequence += 1;
    *sequence
}

fn sort_pets(pets: &mut [Pet], sort: PetSort) {
    match sort {
        PetSort::Newest => pets.sort_by(|a, b| {
            b.arrival_date
                .cmp(&a.arrival_date)
                .then_with(|| a.name.cmp(&b.name))
        }),
        PetSort::Oldest => pets.sort_by(|a, b| {
            a.arrival_date
                .cmp(&b.arrival_date)
                .then_with(|| a.name.cmp(&b.name))
        }),
        PetSort::Name => pets.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

fn newest_first(applications: &mut [AdoptionApplication]) {
    applications.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl PetRepository for MemoryShelterStore {
    fn insert(&self, pet: NewPet, slug: String) -> Result<Pet, RepositoryError> {
        let mut state = self.lock();
        if state.pets.values().any(|existing| existing.slug == slug) {
            return Err(RepositoryError::Conflict);
        }

        let id = PetId(next(&mut state.pet_sequence));
        let record = Pet {
            id,
            name: pet.name,
            slug,
            species: pet.species,
            breed: pet.breed,
            age: pet.age,
            gender: pet.gender,
            size: pet.size,
            color: pet.color,
            description: pet.description,
            personality: pet.personality,
            medical: pet.medical,
            images: pet.images,
            status: PetStatus::Available,
            arrival_date: pet.arrival_date,
            adoption_fee_cents: pet.adoption_fee_cents,
            featured: pet.featured,
        };
        state.pets.insert(id, record.clone());
        Ok(record)
    }

    fn apply_update(&self, id: PetId, update: PetUpdate) -> Result<Pet, RepositoryError> {
        let mut state = self.lock();
        let pet = state.pets.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        update.apply(pet);
        Ok(pet.clone())
    }

    fn update_status(&self, id: PetId, status: PetStatus) -> Result<Pet, RepositoryError> {
        let mut state = self.lock();
        let pet = state.pets.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        pet.status = status;
        Ok(pet.clone())
    }

    fn fetch(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.lock().pets.get(&id).cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Pet>, RepositoryError> {
        Ok(self
            .lock()
            .pets
            .values()
            .find(|pet| pet.slug == slug)
            .cloned())
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        Ok(self.lock().pets.values().any(|pet| pet.slug == slug))
    }

    fn list_available(
        &self,
        filters: &PetFilters,
        sort: PetSort,
    ) -> Result<Vec<Pet>, RepositoryError> {
        let mut pets: Vec<Pet> = self
            .lock()
            .pets
            .values()
            .filter(|pet| pet.status == PetStatus::Available && filters.matches(pet))
            .cloned()
            .collect();
        sort_pets(&mut pets, sort);
        Ok(pets)
    }

    fn status_counts(&self) -> Result<PetStatusCounts, RepositoryError> {
        let state = self.lock();
        let mut counts = PetStatusCounts {
            available: 0,
            pending: 0,
            adopted: 0,
        };
        for pet in state.pets.values() {
            match pet.status {
                PetStatus::Available => counts.available += 1,
                PetStatus::Pending => counts.pending += 1,
                PetStatus::Adopted => counts.adopted += 1,
            }
        }
        Ok(counts)
    }

    fn delete(&self, id: PetId) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.pets.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        // Applications cascade; stories keep their text but lose the link.
        state.applications.retain(|_, application| application.pet != id);
        for story in state.stories.values_mut() {
            if story.pet == Some(id) {
                story.pet = None;
            }
        }
        Ok(())
    }
}

impl PetStatusWriter for MemoryShelterStore {
    fn write_status(&self, pet: PetId, status: PetStatus) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let record = state.pets.get_mut(&pet).ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(())
    }
}

impl StoryRepository for MemoryShelterStore {
    fn insert(&self, story: NewSuccessStory) -> Result<SuccessStory, RepositoryError> {
        let mut state = self.lock();
        if let Some(pet) = story.pet {
            if !state.pets.contains_key(&pet) {
                return Err(RepositoryError::NotFound);
            }
        }
        let id = StoryId(next(&mut state.story_sequence));
        let record = SuccessStory {
            id,
            pet: story.pet,
            adopter_name: story.adopter_name,
            adoption_date: story.adoption_date,
            title: story.title,
            story: story.story,
            image: story.image,
            featured: story.featured,
        };
        state.stories.insert(id, record.clone());
        Ok(record)
    }

    fn list(&self, featured_only: bool) -> Result<Vec<SuccessStory>, RepositoryError> {
        let mut stories: Vec<SuccessStory> = self
            .lock()
            .stories
            .values()
            .filter(|story| !featured_only || story.featured)
            .cloned()
            .collect();
        stories.sort_by(|a, b| {
            b.adoption_date
                .cmp(&a.adoption_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(stories)
    }
}

impl ApplicationRepository for MemoryShelterStore {
    fn insert(&self, application: NewApplication) -> Result<AdoptionApplication, RepositoryError> {
        let mut state = self.lock();

        // Partial uniqueness: one pending application per (email, pet).
        // Enforced here rather than by a read-then-insert in the service so
        // the check and the write share the same critical section.
        let email = application.form.contact.email.trim().to_lowercase();
        let duplicate = state.applications.values().any(|existing| {
            existing.pet == application.form.pet
                && existing.status == ApplicationStatus::Pending
                && existing.contact.email.trim().to_lowercase() == email
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }

        let id = ApplicationId(next(&mut state.application_sequence));
        let form = application.form;
        let record = AdoptionApplication {
            id,
            user: application.user,
            pet: form.pet,
            contact: form.contact,
            housing: form.housing,
            household: form.household,
            previous_pet_experience: form.previous_pet_experience,
            reason_for_adoption: form.reason_for_adoption,
            status: ApplicationStatus::Pending,
            submitted_at: application.submitted_at,
            reviewed_at: None,
            notes: String::new(),
        };
        state.applications.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<AdoptionApplication>, RepositoryError> {
        Ok(self.lock().applications.get(&id).cloned())
    }

    fn transition(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<StatusTransition, RepositoryError> {
        let mut state = self.lock();
        let application = state
            .applications
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        let previous = application.status;
        application.status = status;
        application.reviewed_at = Some(reviewed_at);
        Ok(StatusTransition {
            application: application.clone(),
            previous,
        })
    }

    fn set_notes(
        &self,
        id: ApplicationId,
        notes: String,
        reviewed_at: DateTime<Utc>,
    ) -> Result<AdoptionApplication, RepositoryError> {
        let mut state = self.lock();
        let application = state
            .applications
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        application.notes = notes;
        application.reviewed_at = Some(reviewed_at);
        Ok(application.clone())
    }

    fn for_identity(
        &self,
        user: Option<UserId>,
        email: &str,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        let email = email.trim().to_lowercase();
        let mut applications: Vec<AdoptionApplication> = self
            .lock()
            .applications
            .values()
            .filter(|application| {
                (user.is_some() && application.user == user)
                    || application.contact.email.trim().to_lowercase() == email
            })
            .cloned()
            .collect();
        newest_first(&mut applications);
        Ok(applications)
    }

    fn pending(&self) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        let mut applications: Vec<AdoptionApplication> = self
            .lock()
            .applications
            .values()
            .filter(|application| application.status == ApplicationStatus::Pending)
            .cloned()
            .collect();
        newest_first(&mut applications);
        Ok(applications)
    }

    fn recent(&self, limit: usize) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        let mut applications: Vec<AdoptionApplication> =
            self.lock().applications.values().cloned().collect();
        newest_first(&mut applications);
        applications.truncate(limit);
        Ok(applications)
    }

    fn search(
        &self,
        filters: &ApplicationFilters,
    ) -> Result<Vec<AdoptionApplication>, RepositoryError> {
        let state = self.lock();
        let needle = filters.search.as_deref().map(str::to_lowercase);

        let mut applications: Vec<AdoptionApplication> = state
            .applications
            .values()
            .filter(|application| {
                if let Some(status) = filters.status {
                    if application.status != status {
                        return false;
                    }
                }
                let Some(needle) = &needle else { return true };

                let pet = state.pets.get(&application.pet);
                let mut haystacks = vec![
                    application.contact.first_name.to_lowercase(),
                    application.contact.last_name.to_lowercase(),
                    application.contact.email.to_lowercase(),
                ];
                if let Some(pet) = pet {
                    haystacks.push(pet.name.to_lowercase());
                    haystacks.push(pet.breed.to_lowercase());
                }
                haystacks.iter().any(|field| field.contains(needle))
            })
            .cloned()
            .collect();
        drop(state);

        newest_first(&mut applications);
        Ok(applications)
    }

    fn count_with_status(&self, status: ApplicationStatus) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()
            .applications
            .values()
            .filter(|application| application.status == status)
            .count())
    }
}

impl ContactRepository for MemoryShelterStore {
    fn insert(
        &self,
        message: NewMessage,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessage, RepositoryError> {
        let mut state = self.lock();
        let id = MessageId(next(&mut state.message_sequence));
        let record = ContactMessage {
            id,
            name: message.name,
            email: message.email,
            phone: message.phone,
            subject: message.subject,
            message: message.message,
            is_read: false,
            is_responded: false,
            received_at,
        };
        state.messages.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: MessageId) -> Result<Option<ContactMessage>, RepositoryError> {
        Ok(self.lock().messages.get(&id).cloned())
    }

    fn set_flags(
        &self,
        id: MessageId,
        read: Option<bool>,
        responded: Option<bool>,
    ) -> Result<ContactMessage, RepositoryError> {
        let mut state = self.lock();
        let message = state.messages.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if let Some(read) = read {
            message.is_read = read;
        }
        if let Some(responded) = responded {
            message.is_responded = responded;
        }
        Ok(message.clone())
    }

    fn unread(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        ContactRepository::search(
            self,
            &MessageFilters {
                read: Some(false),
                search: None,
            },
        )
    }

    fn recent(&self, limit: usize) -> Result<Vec<ContactMessage>, RepositoryError> {
        let mut messages = ContactRepository::search(self, &MessageFilters::default())?;
        messages.truncate(limit);
        Ok(messages)
    }

    fn search(&self, filters: &MessageFilters) -> Result<Vec<ContactMessage>, RepositoryError> {
        let mut messages: Vec<ContactMessage> = self
            .lock()
            .messages
            .values()
            .filter(|message| filters.matches(message))
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.received_at
                .cmp(&a.received_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(messages)
    }

    fn count_unread(&self) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()
            .messages
            .values()
            .filter(|message| !message.is_read)
            .count())
    }
}
