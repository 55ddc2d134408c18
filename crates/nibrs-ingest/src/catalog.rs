//! The NIBRS 2024 tables known by name.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Analysis area a dataset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetGroup {
    Participation,
    Incidents,
    Victims,
    Offenders,
    Arrestees,
    Location,
    Weapons,
    Substances,
}

impl DatasetGroup {
    pub const ALL: [Self; 8] = [
        Self::Participation,
        Self::Incidents,
        Self::Victims,
        Self::Offenders,
        Self::Arrestees,
        Self::Location,
        Self::Weapons,
        Self::Substances,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Participation => "Agency Participation",
            Self::Incidents => "Crime Incidents",
            Self::Victims => "Victim Analysis",
            Self::Offenders => "Offender Analysis",
            Self::Arrestees => "Arrestee Analysis",
            Self::Location => "Location Intelligence",
            Self::Weapons => "Weapons & Violence",
            Self::Substances => "Substance Analytics",
        }
    }
}

impl fmt::Display for DatasetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named table and the file it is published as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub name: &'static str,
    pub file_name: &'static str,
    pub group: DatasetGroup,
}

impl Dataset {
    const fn new(name: &'static str, file_name: &'static str, group: DatasetGroup) -> Self {
        Self {
            name,
            file_name,
            group,
        }
    }

    /// Where this dataset lives inside a data directory.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name)
    }
}

/// Every dataset, in display order.
pub const DATASETS: &[Dataset] = &[
    Dataset::new(
        "Participation by State",
        "NIBRS_Table_2_Participation_by_State_2024.csv",
        DatasetGroup::Participation,
    ),
    Dataset::new(
        "Incidents & Offenses",
        "NIBRS_Table_3_Incidents_Offenses_Victims_and_Known_Offenders_by_Offense_Category_2024.csv",
        DatasetGroup::Incidents,
    ),
    Dataset::new(
        "Victims Age",
        "NIBRS_Table_5_Victims_Age_by_Offense_Category_2024.csv",
        DatasetGroup::Victims,
    ),
    Dataset::new(
        "Victims Sex",
        "NIBRS_Table_6_Victims_Sex_by_Offense_Category_2024.csv",
        DatasetGroup::Victims,
    ),
    Dataset::new(
        "Victims Race",
        "NIBRS_Table_7_Victims_Race_by_Offense_Category_2024.csv",
        DatasetGroup::Victims,
    ),
    Dataset::new(
        "Offenders Age",
        "NIBRS_Table_9_Offenders_Age_by_Offense_Category_2024.csv",
        DatasetGroup::Offenders,
    ),
    Dataset::new(
        "Offenders Sex",
        "NIBRS_Table_10_Offenders_Sex_by_Offense_Category_2024.csv",
        DatasetGroup::Offenders,
    ),
    Dataset::new(
        "Offenders Race",
        "NIBRS_Table_11_Offenders_Race_by_Offense_Category_2024.csv",
        DatasetGroup::Offenders,
    ),
    Dataset::new(
        "Arrestees Age",
        "NIBRS_Table_13_Arrestees_Age_by_Arrest_Offense_Category_2024.csv",
        DatasetGroup::Arrestees,
    ),
    Dataset::new(
        "Arrestees Sex",
        "NIBRS_Table_14_Arrestees_Sex_by_Arrest_Offense_Category_2024.csv",
        DatasetGroup::Arrestees,
    ),
    Dataset::new(
        "Arrestees Race",
        "NIBRS_Table_15_Arrestees_Race_by_Arrest_Offense_Category_2024.csv",
        DatasetGroup::Arrestees,
    ),
    Dataset::new(
        "Victim-Offender Relationship",
        "NIBRS_Table_16_Relationship_of_Victims_to_Offenders_by_Offense_Category_2024.csv",
        DatasetGroup::Location,
    ),
    Dataset::new(
        "Property Crimes by Location",
        "NIBRS_Table_18_Crimes_Against_Property_Offenses_Offense_Category_by_Location_2024.csv",
        DatasetGroup::Location,
    ),
    Dataset::new(
        "Drug Seizures",
        "NIBRS_Table_32_Incidents_with_Drugs_Narcotics_Seized_by_Suspected_Drug_Type_2024.csv",
        DatasetGroup::Substances,
    ),
    Dataset::new(
        "Drug & Alcohol Use",
        "NIBRS_Table_33_Offenses_Involving_Offenders_Suspected_Use_Drugs_Narcotics_and_Alcohol_by_Offense_Category_2024.csv",
        DatasetGroup::Substances,
    ),
    Dataset::new(
        "Weapon Usage",
        "NIBRS_Table_23_Offenses_Involving_Weapon_Use_Off_Cat_by_Type_of_Weapon_Force_Involved_2024.csv",
        DatasetGroup::Weapons,
    ),
    Dataset::new(
        "Murder & Assault",
        "NIBRS_Table_24_Murder_and_Nonnegligent_Manslaughter_and_Aggravated_Assault_Victims_Off_Type_by_Circumst_2024.csv",
        DatasetGroup::Weapons,
    ),
    Dataset::new(
        "Justifiable Homicide",
        "NIBRS_Table_26_Individuals_Justifiably_Killed_Justifiable_Homicide_Circum_by_Agg_Aslt_Homicide_Circum_2024.csv",
        DatasetGroup::Weapons,
    ),
];

/// Looks a dataset up by display name or file name, ignoring case.
pub fn find_dataset(name: &str) -> Option<&'static Dataset> {
    let name = name.trim();
    DATASETS.iter().find(|dataset| {
        dataset.name.eq_ignore_ascii_case(name) || dataset.file_name.eq_ignore_ascii_case(name)
    })
}

/// Datasets of one group, in display order.
pub fn datasets_in(group: DatasetGroup) -> impl Iterator<Item = &'static Dataset> {
    DATASETS.iter().filter(move |dataset| dataset.group == group)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_and_files_are_unique() {
        let names: HashSet<_> = DATASETS.iter().map(|d| d.name).collect();
        let files: HashSet<_> = DATASETS.iter().map(|d| d.file_name).collect();
        assert_eq!(names.len(), DATASETS.len());
        assert_eq!(files.len(), DATASETS.len());
        assert_eq!(DATASETS.len(), 18);
    }

    #[test]
    fn test_find_dataset() {
        assert_eq!(find_dataset("victims age").map(|d| d.group), Some(DatasetGroup::Victims));
        assert_eq!(
            find_dataset("NIBRS_Table_2_Participation_by_State_2024.csv").map(|d| d.name),
            Some("Participation by State")
        );
        assert!(find_dataset("Hate Crimes").is_none());
    }

    #[test]
    fn test_every_group_has_datasets() {
        for group in DatasetGroup::ALL {
            assert!(datasets_in(group).next().is_some(), "{group} is empty");
        }
        assert_eq!(datasets_in(DatasetGroup::Weapons).count(), 3);
    }

    #[test]
    fn test_path_in() {
        let dataset = find_dataset("Drug Seizures").unwrap();
        let path = dataset.path_in(Path::new("data"));
        assert_eq!(path, Path::new("data").join(dataset.file_name));
    }
}
