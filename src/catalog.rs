use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Region identifiers the VPN client accepts, canonical spelling with
/// words joined by underscores.
const BUILTIN_REGIONS: &[&str] = &[
    "Albania",
    "Algeria",
    "Andorra",
    "Argentina",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahamas",
    "Bangladesh",
    "Belgium",
    "Belize",
    "Bermuda",
    "Bhutan",
    "Bolivia",
    "Bosnia_And_Herzegovina",
    "Brazil",
    "Brunei_Darussalam",
    "Bulgaria",
    "Cambodia",
    "Canada",
    "Cayman_Islands",
    "Chile",
    "Colombia",
    "Costa_Rica",
    "Croatia",
    "Cyprus",
    "Czech_Republic",
    "Denmark",
    "Dominican_Republic",
    "Ecuador",
    "Egypt",
    "El_Salvador",
    "Estonia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Ghana",
    "Greece",
    "Greenland",
    "Guam",
    "Guatemala",
    "Honduras",
    "Hong_Kong",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Ireland",
    "Isle_Of_Man",
    "Israel",
    "Italy",
    "Jamaica",
    "Japan",
    "Jersey",
    "Kazakhstan",
    "Kenya",
    "Lao_Peoples_Democratic_Republic",
    "Latvia",
    "Lebanon",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Malaysia",
    "Malta",
    "Mexico",
    "Moldova",
    "Monaco",
    "Mongolia",
    "Montenegro",
    "Morocco",
    "Myanmar",
    "Nepal",
    "Netherlands",
    "New_Zealand",
    "Nigeria",
    "North_Macedonia",
    "Norway",
    "Pakistan",
    "Panama",
    "Papua_New_Guinea",
    "Paraguay",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Puerto_Rico",
    "Romania",
    "Serbia",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "South_Africa",
    "South_Korea",
    "Spain",
    "Sri_Lanka",
    "Sweden",
    "Switzerland",
    "Taiwan",
    "Thailand",
    "Trinidad_And_Tobago",
    "Turkey",
    "Ukraine",
    "United_Arab_Emirates",
    "United_Kingdom",
    "United_States",
    "Uruguay",
    "Uzbekistan",
    "Venezuela",
    "Vietnam",
];

/// Ordered set of valid region names. Membership is the sole validity
/// criterion, comparison is exact-match and case-sensitive.
#[derive(Debug, Clone)]
pub struct Catalog {
    regions: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in region list shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            regions: BUILTIN_REGIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Load a catalog from a newline-delimited file. Blank lines and
    /// lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains no entries
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read region catalog {}", path.display()))?;

        let regions: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();

        if regions.is_empty() {
            bail!("region catalog {} contains no entries", path.display());
        }

        Ok(Self { regions })
    }

    /// Returns true iff `name` exactly matches one catalog entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.regions.iter().any(|region| region == name)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
