//! # Setting Profiles Module
//!
//! Tabella statica dei profili di impostazioni (preset di import/export) che
//! devono essere caricati sul server prima di qualsiasi export o import.
//!
//! ## Responsabilità:
//! - Definisce `SettingProfile` (uuid stabile, nome, template XML)
//! - Seleziona il set di profili in base al `Flavor` di deployment (video o audio)
//! - Sostituisce il placeholder `replace-name` con il nome del profilo
//!
//! ## Ruoli:
//! - `Import`: profilo usato da ImportFile
//! - `ClipExport`: export di masterclip e subclip
//! - `SequenceExport`: export di sequence

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Placeholder the XML templates carry in place of the profile name
pub const NAME_PLACEHOLDER: &str = "replace-name";

/// Deployment flavor; selects the profile set and the exported container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Video,
    Audio,
}

impl Flavor {
    /// Extension of the artifact an export with this flavor produces
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Video => "mxf",
            Self::Audio => "wav",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileRole {
    Import,
    ClipExport,
    SequenceExport,
}

impl ProfileRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::ClipExport => "export",
            Self::SequenceExport => "sequence export",
        }
    }
}

/// A server-side configuration payload identified by a stable uuid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingProfile {
    pub role: ProfileRole,
    pub unique_id: Uuid,
    pub name: &'static str,
    pub payload_template: &'static str,
}

impl SettingProfile {
    /// Payload with the generic name replaced by this profile's name
    pub fn render(&self) -> String {
        self.payload_template.replacen(NAME_PLACEHOLDER, self.name, 1)
    }
}

const IMPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Setting type="Import" name="replace-name">
  <Video resize="none" alpha="none" colorLevels="computer"/>
  <Audio autodetect="true"/>
  <Destination link="false"/>
</Setting>"#;

const VIDEO_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Setting type="Export" name="replace-name">
  <ExportAs format="MXF OP1a"/>
  <Range useMarks="true" selectedTracks="true"/>
  <Video include="true" codec="DNxHD" sameAsSource="true"/>
  <Audio include="true" sampleRate="48000" bitDepth="24"/>
</Setting>"#;

const VIDEO_SEQUENCE_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Setting type="Export" name="replace-name">
  <ExportAs format="MXF OP1a"/>
  <Range useMarks="false" selectedTracks="false"/>
  <Video include="true" codec="DNxHD" sameAsSource="true" mixdown="true"/>
  <Audio include="true" sampleRate="48000" bitDepth="24" mixdown="true"/>
</Setting>"#;

const AUDIO_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Setting type="Export" name="replace-name">
  <ExportAs format="WAVE"/>
  <Range useMarks="true" selectedTracks="true"/>
  <Video include="false"/>
  <Audio include="true" sampleRate="48000" bitDepth="24" mix="stereo"/>
</Setting>"#;

const AUDIO_SEQUENCE_EXPORT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Setting type="Export" name="replace-name">
  <ExportAs format="WAVE"/>
  <Range useMarks="false" selectedTracks="false"/>
  <Video include="false"/>
  <Audio include="true" sampleRate="48000" bitDepth="24" mix="stereo" mixdown="true"/>
</Setting>"#;

const IMPORT_PROFILE: SettingProfile = SettingProfile {
    role: ProfileRole::Import,
    unique_id: uuid!("2334e325-efb8-43fa-82a1-2f8dce01ab95"),
    name: "import-acclaim",
    payload_template: IMPORT_XML,
};

static VIDEO_PROFILES: [SettingProfile; 3] = [
    IMPORT_PROFILE,
    SettingProfile {
        role: ProfileRole::ClipExport,
        unique_id: uuid!("c2c404c2-e098-47f1-ad3a-22b3c5bd0ca1"),
        name: "export-acclaim",
        payload_template: VIDEO_EXPORT_XML,
    },
    SettingProfile {
        role: ProfileRole::SequenceExport,
        unique_id: uuid!("bfce0ba0-5e4d-4f62-9302-f13621f2c80a"),
        name: "seqexport-acclaim",
        payload_template: VIDEO_SEQUENCE_EXPORT_XML,
    },
];

static AUDIO_PROFILES: [SettingProfile; 3] = [
    IMPORT_PROFILE,
    SettingProfile {
        role: ProfileRole::ClipExport,
        unique_id: uuid!("5f0c7d1e-3b7a-4c52-9e61-a8d4f2b6c913"),
        name: "wavexport-acclaim",
        payload_template: AUDIO_EXPORT_XML,
    },
    SettingProfile {
        role: ProfileRole::SequenceExport,
        unique_id: uuid!("9a3e6b42-71d5-4f08-b2c7-0e4d8f1a5c76"),
        name: "seqwavexport-acclaim",
        payload_template: AUDIO_SEQUENCE_EXPORT_XML,
    },
];

/// The profile set a deployment flavor provisions
pub fn profiles_for(flavor: Flavor) -> &'static [SettingProfile] {
    match flavor {
        Flavor::Video => &VIDEO_PROFILES,
        Flavor::Audio => &AUDIO_PROFILES,
    }
}

/// Name of the profile with `role` in the set for `flavor`
pub fn profile_name(flavor: Flavor, role: ProfileRole) -> &'static str {
    profiles_for(flavor)
        .iter()
        .find(|p| p.role == role)
        .map(|p| p.name)
        .unwrap_or(IMPORT_PROFILE.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_render_substitutes_name() {
        let rendered = VIDEO_PROFILES[1].render();
        assert!(rendered.contains(r#"name="export-acclaim""#));
        assert!(!rendered.contains(NAME_PLACEHOLDER));
    }

    #[test]
    fn test_each_flavor_has_every_role() {
        for flavor in [Flavor::Video, Flavor::Audio] {
            let roles: HashSet<_> = profiles_for(flavor).iter().map(|p| p.role).collect();
            assert_eq!(roles.len(), 3, "{:?}", flavor);
        }
    }

    #[test]
    fn test_profile_names_per_flavor() {
        assert_eq!(profile_name(Flavor::Video, ProfileRole::SequenceExport), "seqexport-acclaim");
        assert_eq!(profile_name(Flavor::Audio, ProfileRole::ClipExport), "wavexport-acclaim");
        assert_eq!(profile_name(Flavor::Audio, ProfileRole::Import), "import-acclaim");
    }

    #[test]
    fn test_unique_ids_distinct_within_flavor() {
        for flavor in [Flavor::Video, Flavor::Audio] {
            let ids: HashSet<_> = profiles_for(flavor).iter().map(|p| p.unique_id).collect();
            assert_eq!(ids.len(), 3);
        }
    }
}
