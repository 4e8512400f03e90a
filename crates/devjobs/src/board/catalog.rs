use super::domain::{JobId, JobRecord};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Loader for the listings a board session starts with.
pub struct JobCatalog;

impl JobCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobRecord>, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let records = Self::from_reader(file)?;
        info!(path = %path.display(), listings = records.len(), "loaded job catalog");
        Ok(records)
    }

    /// Parses a CSV export with headers
    /// `id,title,company,description,tags,role,location,experience,salary`.
    /// `tags` is itself comma separated inside the quoted field.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JobRecord>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (idx, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = row?;
            records.push(row.into_record(idx)?);
        }

        Ok(records)
    }

    /// The stock DevJobs listings.
    pub fn sample() -> Vec<JobRecord> {
        SAMPLE_LISTINGS
            .iter()
            .enumerate()
            .map(|(idx, listing)| listing.to_record(idx))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to open catalog {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row} is missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    title: String,
    company: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: String,
    role: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    salary: String,
}

impl CatalogRow {
    fn into_record(self, idx: usize) -> Result<JobRecord, CatalogError> {
        // Rows are reported one-based to match what a spreadsheet shows.
        let row = idx + 1;
        if self.title.is_empty() {
            return Err(CatalogError::MissingField { row, field: "title" });
        }
        if self.role.is_empty() {
            return Err(CatalogError::MissingField { row, field: "role" });
        }

        Ok(JobRecord {
            id: JobId(self.id.unwrap_or_else(|| generated_id(idx))),
            title: self.title,
            company: self.company,
            description: self.description,
            tags: split_tags(&self.tags),
            role: self.role,
            location: self.location,
            experience_level: self.experience,
            salary_text: self.salary,
            original_index: idx,
        })
    }
}

fn generated_id(idx: usize) -> String {
    format!("job-{:03}", idx + 1)
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

struct SampleListing {
    title: &'static str,
    company: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    role: &'static str,
    location: &'static str,
    experience: &'static str,
    salary: &'static str,
}

impl SampleListing {
    fn to_record(&self, idx: usize) -> JobRecord {
        JobRecord {
            id: JobId(generated_id(idx)),
            title: self.title.to_string(),
            company: self.company.to_string(),
            description: self.description.to_string(),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            role: self.role.to_string(),
            location: self.location.to_string(),
            experience_level: self.experience.to_string(),
            salary_text: self.salary.to_string(),
            original_index: idx,
        }
    }
}

const SAMPLE_LISTINGS: &[SampleListing] = &[
    SampleListing {
        title: "Senior Frontend Developer",
        company: "TechCorp",
        description: "Build responsive interfaces with React and TypeScript for a fast-growing SaaS platform.",
        tags: &["React", "TypeScript", "JavaScript", "CSS"],
        role: "frontend",
        location: "remote",
        experience: "senior",
        salary: "$120k - $160k",
    },
    SampleListing {
        title: "Backend Engineer",
        company: "DataFlow",
        description: "Design scalable APIs and data pipelines serving millions of requests per day.",
        tags: &["Python", "Django", "PostgreSQL"],
        role: "backend",
        location: "san-francisco",
        experience: "mid",
        salary: "$110k - $140k",
    },
    SampleListing {
        title: "Full Stack Developer",
        company: "StartupXYZ",
        description: "Own features end to end across a Node.js API and a React single-page app.",
        tags: &["Node.js", "React", "MongoDB", "JavaScript"],
        role: "fullstack",
        location: "new-york",
        experience: "mid",
        salary: "$100k - $130k",
    },
    SampleListing {
        title: "DevOps Engineer",
        company: "CloudScale",
        description: "Automate infrastructure, CI/CD pipelines, and observability on Kubernetes.",
        tags: &["Kubernetes", "AWS", "Terraform", "Python"],
        role: "devops",
        location: "remote",
        experience: "senior",
        salary: "$130k - $170k",
    },
    SampleListing {
        title: "Junior Mobile Developer",
        company: "AppWorks",
        description: "Ship cross-platform mobile apps with React Native alongside senior mentors.",
        tags: &["React Native", "JavaScript", "iOS", "Android"],
        role: "mobile",
        location: "austin",
        experience: "entry",
        salary: "$75k - $95k",
    },
    SampleListing {
        title: "Java Platform Engineer",
        company: "FinEdge",
        description: "Maintain low-latency trading services built on the JVM and Kafka.",
        tags: &["Java", "Spring", "Kafka"],
        role: "backend",
        location: "new-york",
        experience: "senior",
        salary: "$150k - $190k",
    },
    SampleListing {
        title: "Frontend Engineer (Vue)",
        company: "acme studios",
        description: "Craft accessible design-system components and marketing pages.",
        tags: &["Vue", "JavaScript", "CSS"],
        role: "frontend",
        location: "remote",
        experience: "entry",
        salary: "$80k - $100k",
    },
    SampleListing {
        title: "Node.js API Developer",
        company: "DataFlow",
        description: "Extend the public REST API and webhook delivery service.",
        tags: &["Node.js", "Express", "Redis"],
        role: "backend",
        location: "remote",
        experience: "mid",
        salary: "Competitive",
    },
];
