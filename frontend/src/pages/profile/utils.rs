use crate::api::{ProfileUpdate, UserProfile};

pub const PROFILE_UPDATED_MESSAGE: &str = "Perfil atualizado com sucesso";
pub const PROFILE_UPDATE_FAILED_MESSAGE: &str = "Não foi possível atualizar o perfil";

/// Editable subset of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    pub nif: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            phone: profile.phone.clone(),
            nif: profile.nif.clone(),
        }
    }

    /// Only the fields that differ from `current`.
    pub fn changes_from(&self, current: &UserProfile) -> ProfileUpdate {
        let changed = |new: &str, old: &str| {
            let new = new.trim();
            (new != old).then(|| new.to_string())
        };
        ProfileUpdate {
            full_name: changed(&self.full_name, &current.full_name),
            phone: changed(&self.phone, &current.phone),
            nif: changed(&self.nif, &current.nif),
            profile_photo: None,
        }
    }
}

pub fn is_empty_update(update: &ProfileUpdate) -> bool {
    update.full_name.is_none()
        && update.phone.is_none()
        && update.nif.is_none()
        && update.profile_photo.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::profile;

    #[test]
    fn unchanged_form_produces_empty_update() {
        let current = profile("u1");
        let form = ProfileForm::from_profile(&current);
        assert!(is_empty_update(&form.changes_from(&current)));
    }

    #[test]
    fn only_edited_fields_are_sent() {
        let current = profile("u1");
        let mut form = ProfileForm::from_profile(&current);
        form.phone = " 933333333 ".into();
        let update = form.changes_from(&current);
        assert_eq!(update.phone.as_deref(), Some("933333333"));
        assert!(update.full_name.is_none());
        assert!(update.nif.is_none());
    }
}
