use super::{GraphStore, NetworkError, RoutingNetwork};
use csv::QuoteStyle;
use flate2::{write::GzEncoder, Compression};
use kdam::tqdm;
use serde::Serialize;
use std::{fs::File, path::Path};

pub trait NetworkWriter {
    /// writes the network as gzipped CSV files in a shared directory. files
    /// that already exist are left in place unless `overwrite` is set.
    fn write_csv(&self, output_directory: &Path, overwrite: bool) -> Result<(), NetworkError>;
}

mod filenames {
    pub const VERTICES: &str = "vertices.csv.gz";
    pub const EDGES: &str = "edges.csv.gz";
    pub const EDGE_PROFILES: &str = "edge-profiles.csv.gz";
}

#[derive(Serialize)]
struct VertexRow {
    vertex_id: u32,
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct EdgeRow {
    edge_id: u32,
    src_vertex_id: u32,
    dst_vertex_id: u32,
    distance: f32,
    profile_id: u16,
    meta: u32,
}

#[derive(Serialize)]
struct ProfileRow {
    profile_id: u16,
    attributes: String,
}

impl NetworkWriter for RoutingNetwork {
    fn write_csv(&self, output_directory: &Path, overwrite: bool) -> Result<(), NetworkError> {
        if !output_directory.is_dir() {
            std::fs::create_dir_all(output_directory).map_err(|e| {
                NetworkError::IoError(format!(
                    "unable to create directory {}: {e}",
                    output_directory.to_string_lossy()
                ))
            })?;
        }

        if let Some(mut writer) = create_writer(output_directory, filenames::VERTICES, overwrite)? {
            let v_iter = tqdm!(
                self.vertices(),
                total = self.vertex_count(),
                desc = "write vertex dataset"
            );
            for (vertex_id, coordinate) in v_iter {
                let row = VertexRow {
                    vertex_id: vertex_id.0,
                    x: coordinate.x,
                    y: coordinate.y,
                };
                writer
                    .serialize(row)
                    .map_err(|e| NetworkError::CsvWriteError(String::from(filenames::VERTICES), e))?;
            }
            eprintln!();
            finish(writer, filenames::VERTICES)?;
        }

        if let Some(mut writer) = create_writer(output_directory, filenames::EDGES, overwrite)? {
            let e_iter = tqdm!(
                self.edges(),
                total = self.edge_count(),
                desc = "write edges dataset"
            );
            for (edge_id, edge) in e_iter {
                let row = EdgeRow {
                    edge_id: edge_id.0,
                    src_vertex_id: edge.from.0,
                    dst_vertex_id: edge.to.0,
                    distance: edge.distance,
                    profile_id: edge.profile.0,
                    meta: edge.meta,
                };
                writer
                    .serialize(row)
                    .map_err(|e| NetworkError::CsvWriteError(String::from(filenames::EDGES), e))?;
            }
            eprintln!();
            finish(writer, filenames::EDGES)?;
        }

        if let Some(mut writer) =
            create_writer(output_directory, filenames::EDGE_PROFILES, overwrite)?
        {
            for (profile_id, attributes) in self.profiles().iter() {
                let row = ProfileRow {
                    profile_id: profile_id.0,
                    attributes: attributes.to_string(),
                };
                writer.serialize(row).map_err(|e| {
                    NetworkError::CsvWriteError(String::from(filenames::EDGE_PROFILES), e)
                })?;
            }
            finish(writer, filenames::EDGE_PROFILES)?;
        }

        Ok(())
    }
}

/// opens a gzipped csv writer, or returns None if the file exists and
/// should not be overwritten.
fn create_writer(
    directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<Option<csv::Writer<GzEncoder<File>>>, NetworkError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        log::warn!(
            "{} exists and overwrite is false, skipping",
            filepath.to_string_lossy()
        );
        return Ok(None);
    }
    let file = File::create(&filepath).map_err(|e| {
        NetworkError::IoError(format!(
            "unable to create file {}: {e}",
            filepath.to_string_lossy()
        ))
    })?;
    let buffer = GzEncoder::new(file, Compression::default());
    let writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(buffer);
    Ok(Some(writer))
}

/// flushes the csv buffer and writes the gzip trailer.
fn finish(writer: csv::Writer<GzEncoder<File>>, filename: &str) -> Result<(), NetworkError> {
    let encoder = writer
        .into_inner()
        .map_err(|e| NetworkError::IoError(format!("failure flushing {filename}: {e}")))?;
    encoder
        .finish()
        .map_err(|e| NetworkError::IoError(format!("failure closing {filename}: {e}")))?;
    Ok(())
}
