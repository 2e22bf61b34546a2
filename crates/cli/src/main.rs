use clap::{Parser, Subcommand};
use medinfo_catalog::{disease_catalog, drug_catalog, RecordId, Searchable};
use medinfo_core::{
    reclick_policy_from_env_value, search_latency_from_env_value, search_records,
    upload_max_bytes_from_env_value, CoreConfig, Notice, PanelEffect, PanelEvent, PanelSession,
    Selection,
};
use medinfo_uploads::ImageStore;

#[derive(Parser)]
#[command(name = "medinfo")]
#[command(about = "Medicine information catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the disease catalog
    SearchDiseases {
        /// Search term (name, description, category or symptom)
        query: String,
        /// Expand one record from the results by id
        #[arg(long)]
        expand: Option<RecordId>,
        /// Skip the simulated search delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Search the drug catalog
    SearchDrugs {
        /// Search term (matched against drug names)
        query: String,
        /// Expand one record from the results by id
        #[arg(long)]
        expand: Option<RecordId>,
        /// Skip the simulated search delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Validate a medicine image the way the upload surface would
    CheckImage {
        /// Path to the image file
        path: String,
    },
    /// List both catalogs
    List,
}

fn config_from_env() -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let search_latency =
        search_latency_from_env_value(std::env::var("MEDINFO_SEARCH_LATENCY_MS").ok())?;
    let reclick_policy =
        reclick_policy_from_env_value(std::env::var("MEDINFO_RECLICK_POLICY").ok())?;
    let upload_max_bytes =
        upload_max_bytes_from_env_value(std::env::var("MEDINFO_UPLOAD_MAX_BYTES").ok())?;
    Ok(CoreConfig::new(
        search_latency,
        medinfo_catalog::MatchFields::BROAD,
        medinfo_catalog::MatchFields::NAME_ONLY,
        reclick_policy,
        upload_max_bytes,
    )?)
}

/// Drives one panel session through a full search: request, simulated
/// delay, completion, and optionally a record click.
///
/// Returns the ids of the final result set and the resulting selection.
fn run_panel_search<R: Searchable>(
    config: &CoreConfig,
    catalog: &[R],
    fields: medinfo_catalog::MatchFields,
    raw_query: &str,
    expand: Option<RecordId>,
    no_delay: bool,
) -> (Vec<RecordId>, Selection) {
    let mut session = PanelSession::new(config.reclick_policy());
    session.apply(PanelEvent::QueryChanged(raw_query.to_string()));

    for effect in session.apply(PanelEvent::SearchRequested) {
        match effect {
            PanelEffect::BeginSearch { seq, query } => {
                if !no_delay {
                    std::thread::sleep(config.search_latency());
                }
                let results: Vec<RecordId> = search_records(&query, catalog, fields)
                    .iter()
                    .map(|r| r.id())
                    .collect();
                for effect in session.apply(PanelEvent::SearchCompleted { seq, results }) {
                    if let PanelEffect::Notify(notice) = effect {
                        print_notice(&notice);
                    }
                }
            }
            PanelEffect::Notify(notice) => print_notice(&notice),
        }
    }

    if let Some(id) = expand {
        session.apply(PanelEvent::RecordClicked(id));
        if session.selection() == Selection::NoSelection {
            eprintln!("Record {} is not in the current results.", id);
        }
    }

    (session.results().to_vec(), session.selection())
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::SearchTermRequired => eprintln!("Please enter a term to search."),
        Notice::NoResultsFound => println!("No results found."),
        Notice::SearchComplete { total } => println!("Found {} matching records.", total),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::SearchDiseases {
            query,
            expand,
            no_delay,
        }) => {
            let config = config_from_env()?;
            let (ids, selection) = run_panel_search(
                &config,
                disease_catalog(),
                config.disease_fields(),
                &query,
                expand,
                no_delay,
            );
            for disease in disease_catalog().iter().filter(|d| ids.contains(&d.id)) {
                println!(
                    "[{}] {} ({}, {})",
                    disease.id, disease.name, disease.category, disease.severity
                );
            }
            if let Selection::Selected(id) = selection {
                if let Some(disease) = disease_catalog().iter().find(|d| d.id == id) {
                    println!();
                    println!("{}: {}", disease.name, disease.description);
                    println!("  Symptoms: {}", disease.symptoms.join(", "));
                    println!("  Treatment: {}", disease.treatment);
                    println!("  Prevention: {}", disease.prevention.join(", "));
                    println!("  Duration: {}", disease.duration);
                    println!("  See a doctor: {}", disease.when_to_see_doctor.join("; "));
                }
            }
        }
        Some(Commands::SearchDrugs {
            query,
            expand,
            no_delay,
        }) => {
            let config = config_from_env()?;
            let (ids, selection) = run_panel_search(
                &config,
                drug_catalog(),
                config.drug_fields(),
                &query,
                expand,
                no_delay,
            );
            for drug in drug_catalog().iter().filter(|d| ids.contains(&d.id)) {
                println!("[{}] {} ({})", drug.id, drug.name, drug.category);
            }
            if let Selection::Selected(id) = selection {
                if let Some(drug) = drug_catalog().iter().find(|d| d.id == id) {
                    println!();
                    println!("{}: {}", drug.name, drug.description);
                    println!("  Used for: {}", drug.used_for.join(", "));
                    println!("  Side effects: {}", drug.side_effects.join(", "));
                    println!("  Dosage: {}", drug.dosage);
                    println!("  Warnings: {}", drug.warnings.join("; "));
                }
            }
        }
        Some(Commands::CheckImage { path }) => {
            let config = config_from_env()?;
            let bytes = std::fs::read(&path)?;
            let store = ImageStore::new(config.upload_max_bytes());
            match store.add(bytes, &path) {
                Ok(reference) => {
                    println!("Accepted {} ({} bytes)", reference.media_type, reference.size_bytes);
                    println!("Hash: {}", reference.hash);
                }
                Err(e) => eprintln!("Rejected: {}", e),
            }
        }
        Some(Commands::List) => {
            println!("Diseases:");
            for disease in disease_catalog() {
                println!("  [{}] {} ({})", disease.id, disease.name, disease.category);
            }
            println!("Drugs:");
            for drug in drug_catalog() {
                println!("  [{}] {} ({})", drug.id, drug.name, drug.category);
            }
        }
        None => {
            println!("Use 'medinfo --help' for commands");
        }
    }

    Ok(())
}
