use bambam_transit::{
    algorithm::fusion,
    config::TransitFusionConfiguration,
    model::{
        network::NetworkWriter,
        osm::{road_import, TransitIndex},
        resolve::NetworkResolver,
        TransitCliError,
    },
};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransitAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    Pbf {
        #[arg(long, help = "path to .pbf file with the road network")]
        network_pbf_file: String,
        #[arg(
            long,
            help = "path to .pbf file with transit route relations, defaults to the network file"
        )]
        transit_pbf_file: Option<String>,
        #[arg(long, help = "path to file with bambam-transit fusion parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for network dataset")]
        output_directory: String,
    },
}

pub fn run(app: &App) -> Result<(), TransitCliError> {
    env_logger::init();
    match app {
        App::Pbf {
            network_pbf_file,
            transit_pbf_file,
            configuration_file,
            output_directory,
        } => {
            let conf = match configuration_file {
                None => Ok(TransitFusionConfiguration::default()),
                Some(f) => {
                    log::info!("reading bambam-transit configuration from {f}");
                    TransitFusionConfiguration::try_from(f)
                }
            }?;
            let transit_file = transit_pbf_file.as_ref().unwrap_or(network_pbf_file);

            let mut network = road_import::read_road_network(
                Path::new(network_pbf_file),
                conf.max_edge_distance_meters,
            )?;
            let resolver = NetworkResolver::new(&network, conf.search_distance_meters);
            let index = TransitIndex::from_pbf(Path::new(transit_file), &conf.route_filter())?;
            let stats = fusion::add_public_transport(
                &mut network,
                index.relations(),
                &index,
                &resolver,
                &conf,
            )?;

            let out_path = Path::new(output_directory);
            network.write_csv(out_path, conf.overwrite)?;
            stats.write_json(out_path, conf.overwrite)?;
            eprintln!("finished.");
            Ok(())
        }
    }
}

fn main() {
    let args = TransitAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("bambam-transit failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
