//
//  azure-devops-rest
//  api/areas.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource area identifiers.
//!
//! Each sub-service of the platform is registered under a fixed GUID that
//! location-discovery endpoints use to find the host serving it. The table is
//! read-only data compiled into the binary.

/// `(area name, area id)` pairs.
pub const RESOURCE_AREAS: &[(&str, &str)] = &[
    ("build", "965220d5-5bb9-42cf-8d67-9b146df2a5a4"),
    ("core", "79134c72-4a58-4b42-976c-04e7115f32bf"),
    ("dashboard", "31c84e0a-3ece-48fd-a29d-100849af99ba"),
    ("git", "4e080c62-fa21-4fbc-8fef-2a10a2b38049"),
    ("graph", "bb1e7ec9-e901-4b68-999a-de7012b920f8"),
    ("policy", "fb13a388-40dd-4a04-b530-013a739c72ef"),
    ("profile", "8ccfef3d-2b87-4e99-8ccb-66e343d2daa8"),
    ("release", "efc2f575-36ef-48e9-b672-0c6fb4a48ac5"),
    ("test", "3b95fb80-fdda-4218-b60e-1052d070ae6b"),
    ("wiki", "bf7d82a0-8aa5-4613-94ef-6172a5ea01f3"),
    ("wit", "5264459e-e5e0-4bd8-b118-0985e68a4ec5"),
    ("work", "1d4f49f9-02b9-4e26-b826-2cdb6195f2a9"),
];

/// Looks up an area id by name, ignoring case.
pub fn area_id(name: &str) -> Option<&'static str> {
    RESOURCE_AREAS
        .iter()
        .find(|(area, _)| area.eq_ignore_ascii_case(name))
        .map(|(_, id)| *id)
}

/// Reverse lookup: area name for an id, ignoring case.
pub fn area_name(id: &str) -> Option<&'static str> {
    RESOURCE_AREAS
        .iter()
        .find(|(_, area_id)| area_id.eq_ignore_ascii_case(id))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(area_id("Core"), Some("79134c72-4a58-4b42-976c-04e7115f32bf"));
        assert_eq!(area_name("4E080C62-FA21-4FBC-8FEF-2A10A2B38049"), Some("git"));
        assert_eq!(area_id("nope"), None);
    }

    #[test]
    fn test_ids_are_unique_guids() {
        let mut ids: Vec<&str> = RESOURCE_AREAS.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RESOURCE_AREAS.len());
        assert!(ids.iter().all(|id| id.len() == 36 && id.matches('-').count() == 4));
    }
}
