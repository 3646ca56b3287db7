use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleEntity {
    pub name: String,
    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
}

/// An organizational patch (or area) to which staff and cases are assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub responsible_entities: Vec<ResponsibleEntity>,
}

impl Patch {
    /// Email of the first responsible entity, if any. Patch assignment is
    /// matched on this address.
    pub fn responsible_email(&self) -> Option<&str> {
        self.responsible_entities
            .first()
            .and_then(|entity| entity.contact_details.as_ref())
            .and_then(|details| details.email_address.as_deref())
    }
}

/// The resolved patch/area pair for the signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchAssignment {
    pub patch_id: String,
    pub area_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responsible_email_reads_the_first_entity() {
        let patch: Patch = serde_json::from_str(
            r#"{
                "id": "patch-9",
                "name": "CP9",
                "parentId": "area-2",
                "responsibleEntities": [
                    {
                        "name": "First Officer",
                        "contactDetails": { "emailAddress": "first@example.com" }
                    },
                    {
                        "name": "Second Officer",
                        "contactDetails": { "emailAddress": "second@example.com" }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(patch.responsible_email(), Some("first@example.com"));
        assert_eq!(patch.parent_id.as_deref(), Some("area-2"));
    }

    #[test]
    fn unstaffed_patch_has_no_email() {
        let patch: Patch = serde_json::from_str(
            r#"{ "id": "patch-0", "name": "CP0" }"#,
        )
        .unwrap();

        assert_eq!(patch.responsible_email(), None);
        assert!(patch.responsible_entities.is_empty());
    }
}
