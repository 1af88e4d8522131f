use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use era_core::{
    config::resolve_taxonomy,
    constants::{DEFAULT_AMBULANCE_SPEED_KMH, DEFAULT_LATITUDE, DEFAULT_LONGITUDE},
    dispatch, dispatch_message, facility_source_for, Coordinates, CoreConfig, EraResult,
    Facility, FacilitySource, HospitalMatcher, MatchOutcome, NearbyFacilitySource,
    ScoredFacility, Symptom, SymptomSelection, DEFAULT_RANK_LIMIT,
};

#[derive(Parser)]
#[command(name = "era")]
#[command(about = "ERA emergency response assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable symptoms and the specialties they need
    Symptoms {
        /// Symptom taxonomy file (optional)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
    /// Rank hospitals for the given symptoms
    Rank {
        /// Symptom ids, e.g. chest_pain burns
        symptoms: Vec<String>,
        #[command(flatten)]
        opts: MatchOpts,
    },
    /// Show hospitals near a location
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Base seed for generated hospitals
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Dispatch an ambulance from a ranked hospital
    Dispatch {
        /// Hospital id as shown by `era rank`
        hospital_id: String,
        /// Symptom ids used for the ranking
        #[arg(required = true)]
        symptoms: Vec<String>,
        #[command(flatten)]
        opts: MatchOpts,
    },
}

#[derive(Args)]
struct MatchOpts {
    /// Maximum number of hospitals to rank
    #[arg(long, default_value_t = DEFAULT_RANK_LIMIT)]
    limit: usize,
    /// Fixed hospital catalog file (optional; hospitals are generated otherwise)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Symptom taxonomy file (optional)
    #[arg(long)]
    taxonomy: Option<PathBuf>,
    /// Caller latitude
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Caller longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

impl MatchOpts {
    fn origin(&self) -> EraResult<Option<Coordinates>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
            _ => Ok(None),
        }
    }

    fn matcher(&self) -> EraResult<HospitalMatcher> {
        let cfg = CoreConfig::new(
            self.limit,
            Arc::new(resolve_taxonomy(self.taxonomy.clone())?),
            Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)?,
            DEFAULT_AMBULANCE_SPEED_KMH,
            self.catalog.clone(),
        )?;
        Ok(HospitalMatcher::new(Arc::new(cfg)))
    }

    fn facilities(&self, matcher: &HospitalMatcher) -> EraResult<Vec<Facility>> {
        facility_source_for(matcher.config())?.facilities(self.origin()?)
    }
}

fn parse_symptoms(raw: &[String]) -> EraResult<SymptomSelection> {
    Ok(raw
        .iter()
        .map(Symptom::new)
        .collect::<Result<SymptomSelection, _>>()?)
}

fn facility_line(f: &Facility) -> String {
    format!(
        "{} | {} | {} | {} | ETA {} min | {}",
        f.id,
        f.name,
        f.distance,
        f.phone,
        f.estimated_arrival_minutes,
        f.specialties
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn print_ranked(ranked: &[ScoredFacility]) {
    for (i, s) in ranked.iter().enumerate() {
        println!(
            "{}. [match {}] {}",
            i + 1,
            s.match_score,
            facility_line(&s.facility)
        );
    }
}

/// Rank for `symptoms` and return the entry for `hospital_id` together with the full ranking.
fn select_for_dispatch(
    opts: &MatchOpts,
    hospital_id: &str,
    symptoms: &[String],
) -> EraResult<(Option<ScoredFacility>, Vec<ScoredFacility>)> {
    let matcher = opts.matcher()?;
    let selection = parse_symptoms(symptoms)?;
    let facilities = opts.facilities(&matcher)?;
    let ranked = matcher.rank(&facilities, &selection, None)?;
    let selected = ranked
        .iter()
        .find(|s| s.facility.id.as_str() == hospital_id)
        .cloned();
    Ok((selected, ranked))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Symptoms { taxonomy }) => {
            let taxonomy = resolve_taxonomy(taxonomy)?;
            for def in taxonomy.definitions() {
                let specialties = def
                    .specialties
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:<22} {:<28} {:<14} {}",
                    def.symptom.as_str(),
                    def.label.as_str(),
                    def.category.as_str(),
                    specialties
                );
            }
        }
        Some(Commands::Rank { symptoms, opts }) => {
            let matcher = opts.matcher()?;
            let selection = parse_symptoms(&symptoms)?;
            for unknown in matcher.unknown_symptoms(&selection) {
                eprintln!("Warning: unknown symptom '{}' scores nothing", unknown);
            }
            let facilities = opts.facilities(&matcher)?;
            match matcher.recommend(&facilities, &selection, None)? {
                MatchOutcome::NoSymptoms => {
                    println!("Select at least one symptom to rank hospitals.")
                }
                MatchOutcome::Ranked(ranked) => print_ranked(&ranked),
            }
        }
        Some(Commands::Nearby { lat, lon, seed }) => {
            let origin = Coordinates::new(lat, lon)?;
            let source =
                NearbyFacilitySource::new(origin, DEFAULT_AMBULANCE_SPEED_KMH).with_seed(seed);
            for f in source.facilities(Some(origin))? {
                println!("{}", facility_line(&f));
            }
        }
        Some(Commands::Dispatch {
            hospital_id,
            symptoms,
            opts,
        }) => match select_for_dispatch(&opts, &hospital_id, &symptoms)? {
            (Some(selected), _) => {
                dispatch(&selected, &|f: &Facility| println!("{}", dispatch_message(f)));
            }
            (None, ranked) => {
                eprintln!("Hospital {} is not in the ranking:", hospital_id);
                print_ranked(&ranked);
                return Err(format!("unknown hospital id: {hospital_id}").into());
            }
        },
        None => {
            println!("Use 'era --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn static_opts(limit: usize) -> (tempfile::TempDir, MatchOpts) {
        let temp = tempfile::TempDir::new().unwrap();
        let catalog = temp.path().join("hospitals.yaml");
        std::fs::write(&catalog, era_core::defaults::STANDARD_FACILITIES_YAML).unwrap();
        let opts = MatchOpts {
            limit,
            catalog: Some(catalog),
            taxonomy: None,
            lat: None,
            lon: None,
        };
        (temp, opts)
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_rank_with_location_and_limit() {
        let cli = parse(&[
            "era", "rank", "chest_pain", "burns", "--limit", "2", "--lat", "40.7", "--lon",
            "-74.0",
        ]);
        let Some(Commands::Rank { symptoms, opts }) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(symptoms, vec!["chest_pain", "burns"]);
        assert_eq!(opts.limit, 2);
        assert_eq!(opts.lon, Some(-74.0));
        assert!(opts.origin().unwrap().is_some());
    }

    #[test]
    fn rank_limit_defaults() {
        let cli = parse(&["era", "rank", "burns"]);
        let Some(Commands::Rank { opts, .. }) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(opts.limit, DEFAULT_RANK_LIMIT);
        assert_eq!(opts.origin().unwrap(), None);
    }

    #[test]
    fn latitude_needs_longitude() {
        assert!(Cli::try_parse_from(["era", "rank", "burns", "--lat", "40.7"]).is_err());
    }

    #[test]
    fn dispatch_needs_symptoms() {
        assert!(Cli::try_parse_from(["era", "dispatch", "1"]).is_err());
        let cli = parse(&["era", "dispatch", "1", "chest_pain"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Dispatch { ref hospital_id, .. }) if hospital_id == "1"
        ));
    }

    #[test]
    fn malformed_symptom_is_rejected() {
        assert!(parse_symptoms(&["chest/pain".to_string()]).is_err());
        let selection = parse_symptoms(&["Chest Pain".to_string(), "burns".to_string()]).unwrap();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn dispatch_selects_ranked_hospital() {
        let (_temp, opts) = static_opts(3);
        let (selected, ranked) =
            select_for_dispatch(&opts, "3", &["burns".to_string()]).unwrap();
        assert_eq!(ranked.len(), 3);
        let selected = selected.unwrap();
        assert_eq!(selected.facility.name.as_str(), "Specialized Trauma Center");
        assert_eq!(selected.match_score, 2);
    }

    #[test]
    fn dispatch_outside_ranking_finds_nothing() {
        let (_temp, opts) = static_opts(1);
        let (selected, ranked) =
            select_for_dispatch(&opts, "3", &["chest_pain".to_string()]).unwrap();
        assert!(selected.is_none());
        assert_eq!(ranked[0].facility.name.as_str(), "City Emergency Hospital");
    }

    #[test]
    fn zero_limit_is_rejected() {
        let (_temp, opts) = static_opts(0);
        assert!(opts.matcher().is_err());
    }

    #[test]
    fn generated_facilities_without_catalog() {
        let opts = MatchOpts {
            limit: 3,
            catalog: None,
            taxonomy: None,
            lat: Some(40.7128),
            lon: Some(-74.0060),
        };
        let matcher = opts.matcher().unwrap();
        assert_eq!(opts.facilities(&matcher).unwrap().len(), 5);
    }

    #[test]
    fn facility_line_shows_eta_and_specialties() {
        let (_temp, opts) = static_opts(3);
        let matcher = opts.matcher().unwrap();
        let facilities = opts.facilities(&matcher).unwrap();
        let line = facility_line(&facilities[1]);
        assert!(line.starts_with("2 | Regional Medical Center | 3.5 km"));
        assert!(line.contains("ETA 12 min"));
        assert!(line.contains("stroke center"));
    }
}
