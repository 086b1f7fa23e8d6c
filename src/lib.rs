use std::{
    fs::{File, OpenOptions},
    io::{stdin, Read, Write},
};

use log::{debug, info};

mod action;
mod document;
mod error;
mod generate;
mod paths;
mod request;
mod resolve;

pub use action::{Action, ActionType, DeletePayload, EmptyPayload, RecordPayload, RelationPayload};
pub use document::{fetch, push_in, remove_in, set_in, swap_in, update_in};
pub use error::{ActionError, ActionResult};
pub use generate::{generate_action, generate_action_with, ActionConfig};
pub use paths::{format_path, parse_path, PathChunk};
pub use request::{Mutation, Operation, Relation, RelationKind, Request, Target};
pub use resolve::{resolve, Location, LocationClass, Owner};

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Request document, read from stdin when omitted
    #[arg(long)]
    input: Option<String>,
    #[arg(long)]
    output: Option<String>,
    /// Overwrite the output file if it exists
    #[arg(long)]
    force: bool,
    /// Record field holding the identifier
    #[arg(long, default_value = "id")]
    id_field: String,
}
impl Args {
    pub fn execute(self) -> ActionResult<()> {
        let mut input_buf = vec![];
        let read_result = if let Some(path) = &self.input {
            debug!("Reading request from path: {}", path);
            File::open(path)?.read_to_end(&mut input_buf)?
        } else {
            stdin().read_to_end(&mut input_buf)?
        };

        debug!("Read in {read_result} bytes");

        let request: Request = serde_json::from_slice(&input_buf)?;
        info!("Parsed {} request, generating action", request.mutation);
        let config = ActionConfig::new(self.id_field);
        let action = generate_action_with(&request, &config)?;
        match action.key() {
            Some(key) => info!("Generated {} for `{}`", action.kind(), key),
            None => info!("Generated {}", action.kind()),
        }

        if let Some(path) = self.output {
            debug!("Outputting to file: {}", &path);
            let mut file = OpenOptions::new()
                .write(true)
                .create(self.force)
                .truncate(self.force)
                .create_new(!self.force)
                .open(path)?;

            file.write_all(&serde_json::to_vec_pretty(&action)?)?;
        } else {
            debug!("Outputting to stdout");
            println!("{}", serde_json::to_string_pretty(&action)?);
        }

        Ok(())
    }
}
