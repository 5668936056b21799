// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Async job commands

use anyhow::Result;
use clap::Subcommand;
use cloudstack_client::CloudStackClient;

use crate::output;

#[derive(Subcommand, Clone)]
pub enum JobCommand {
    /// Show the current state of a job
    Get {
        /// Job id
        jobid: String,
    },
    /// Wait for a job to finish and print its result
    Wait {
        /// Job id
        jobid: String,
    },
}

impl JobCommand {
    pub async fn run(self, client: &CloudStackClient) -> Result<()> {
        match self {
            Self::Get { jobid } => {
                let job = client.query_async_job_result(&jobid).await?;
                output::print_json(&job)
            }
            Self::Wait { jobid } => {
                let result = client
                    .get_async_job_result(&jobid, client.config().async_timeout)
                    .await?;
                output::print_json(&result)
            }
        }
    }
}
