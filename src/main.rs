use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum_prometheus::PrometheusMetricLayer;
use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use pawhaven::adoptions::{
    ApplicantContact, ApplicationForm, ApplicationStatus, HouseholdProfile, HousingDetails,
    Occupancy, SubmitterIdentity,
};
use pawhaven::config::AppConfig;
use pawhaven::error::AppError;
use pawhaven::pets::{MedicalFlags, NewPet, Pet, PetGender, PetImages, PetSize, PetSpecies};
use pawhaven::server::{api_router, ops_router, AppState, ShelterServices};
use pawhaven::storage::MemoryShelterStore;
use pawhaven::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "PawHaven",
    about = "Run the PawHaven adoption center service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a seeded adoption application through its lifecycle and print
    /// the result
    Demo,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo => run_demo(),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(MemoryShelterStore::default());
    let services = ShelterServices::new(store);

    if config.seed_demo_data {
        let seeded = seed_pets(&services)?;
        info!(count = seeded.len(), "seeded sample pets");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = api_router(&services)
        .merge(ops_router(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "adoption center service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn seed_pets(services: &ShelterServices) -> Result<Vec<Pet>, AppError> {
    let today = Utc::now().date_naive();
    let seeds = vec![
        NewPet {
            name: "Biscuit".to_string(),
            slug: None,
            species: PetSpecies::Dog,
            breed: "Golden Retriever".to_string(),
            age: "3 years".to_string(),
            gender: PetGender::Male,
            size: PetSize::Large,
            color: "Golden".to_string(),
            description: "Easygoing retriever who fetches until your arm gives out.".to_string(),
            personality: vec!["friendly".to_string(), "energetic".to_string()],
            medical: MedicalFlags {
                vaccinated: true,
                spayed_neutered: true,
                microchipped: true,
                special_needs: false,
                special_needs_description: None,
            },
            images: PetImages::default(),
            arrival_date: today - Duration::days(12),
            adoption_fee_cents: 17_500,
            featured: true,
        },
        NewPet {
            name: "Clementine".to_string(),
            slug: None,
            species: PetSpecies::Cat,
            breed: "Domestic Shorthair".to_string(),
            age: "5 years".to_string(),
            gender: PetGender::Female,
            size: PetSize::Small,
            color: "Orange tabby".to_string(),
            description: "Quiet lap cat on insulin, looking for a patient home.".to_string(),
            personality: vec!["calm".to_string(), "affectionate".to_string()],
            medical: MedicalFlags {
                vaccinated: true,
                spayed_neutered: true,
                microchipped: false,
                special_needs: true,
                special_needs_description: Some("Daily insulin injections.".to_string()),
            },
            images: PetImages::default(),
            arrival_date: today - Duration::days(60),
            adoption_fee_cents: 9_000,
            featured: false,
        },
        NewPet {
            name: "Pepper".to_string(),
            slug: None,
            species: PetSpecies::Rabbit,
            breed: "Mini Lop".to_string(),
            age: "1 year".to_string(),
            gender: PetGender::Female,
            size: PetSize::Small,
            color: "Black and white".to_string(),
            description: "Curious lop who free-roams well once litter trained.".to_string(),
            personality: vec!["curious".to_string()],
            medical: MedicalFlags {
                vaccinated: true,
                spayed_neutered: true,
                microchipped: false,
                special_needs: false,
                special_needs_description: None,
            },
            images: PetImages::default(),
            arrival_date: today - Duration::days(5),
            adoption_fee_cents: 4_500,
            featured: true,
        },
    ];

    let mut pets = Vec::with_capacity(seeds.len());
    for seed in seeds {
        pets.push(services.registry.create(seed)?);
    }
    Ok(pets)
}

fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(MemoryShelterStore::default());
    let services = ShelterServices::new(store);
    let pets = seed_pets(&services)?;

    println!("Adoption workflow demo");
    println!("\nPets in the registry:");
    for pet in &pets {
        println!(
            "- #{} {} ({}, {}) [{}] status {}",
            pet.id,
            pet.name,
            pet.species.label(),
            pet.breed,
            pet.slug,
            pet.status.label()
        );
    }

    let subject = &pets[0];
    let form = ApplicationForm {
        pet: subject.id,
        contact: ApplicantContact {
            first_name: "Jordan".to_string(),
            last_name: "Ellis".to_string(),
            email: "jordan.ellis@example.com".to_string(),
            phone: "(515) 555-0133".to_string(),
            address: "48 Maple Ct, Des Moines, IA 50309".to_string(),
        },
        housing: HousingDetails {
            housing_type: "apartment".to_string(),
            occupancy: Occupancy::Rent,
            landlord_approval: true,
        },
        household: HouseholdProfile {
            adults: 2,
            children: 1,
            has_other_pets: false,
            other_pets_description: String::new(),
        },
        previous_pet_experience: "I have owned three dogs for over ten years total.".to_string(),
        reason_for_adoption: "I want to give a rescue dog a loving forever home with space to run."
            .to_string(),
    };

    let application = services
        .applications
        .submit(form, SubmitterIdentity::Anonymous)?;
    println!(
        "\nApplication #{} from {} for {} (status {})",
        application.id,
        application.contact.full_name(),
        subject.name,
        application.status.label()
    );

    let completed = services
        .lifecycle
        .set_status(application.id, ApplicationStatus::Completed)?;
    let adopted = services.registry.get(completed.pet)?;
    println!(
        "Marked completed -> {} is now {}",
        adopted.name,
        adopted.status.label()
    );

    let reopened = services
        .lifecycle
        .set_status(application.id, ApplicationStatus::Rejected)?;
    let released = services.registry.get(reopened.pet)?;
    println!(
        "Reversed to rejected -> {} is {} again",
        released.name,
        released.status.label()
    );

    Ok(())
}
