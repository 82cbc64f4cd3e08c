//! Demo batch — screens the four sample applications and formats report blocks.

use std::fmt::Write as _;
use std::io;

use anyhow::{Context, Result};

use crate::screening::orchestrator::Screener;
use crate::screening::state::ScreeningResult;

pub const SAMPLE_APPLICATIONS: [&str; 4] = [
    "I have 10 years of experience in software engineering with expertise in JAVA",
    "I have 1 year of experience in software engineering with expertise in JAVA",
    "I have experience in software engineering with expertise in Python",
    "I have 5 years of experience in software engineering with expertise in C++",
];

/// One report block: a blank line, then application, experience level, skill match
/// and response on their own lines.
pub fn format_report(application: &str, result: &ScreeningResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "Application: {application}");
    let _ = writeln!(out, "Experience Level: {}", result.experience_level);
    let _ = writeln!(out, "Skill Match: {}", result.skill_match);
    let _ = writeln!(out, "Response: {}", result.response);
    out
}

/// Screens every sample application in order, writing each report block to `out`
/// as soon as that application is screened. Stops at the first failure.
pub async fn run_demo(screener: &Screener, out: &mut impl io::Write) -> Result<()> {
    for application in SAMPLE_APPLICATIONS {
        let result = screener
            .screen(application)
            .await
            .with_context(|| format!("Failed to screen application: {application}"))?;
        out.write_all(format_report(application, &result).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}
