use crate::api::{NewVehicle, Vehicle};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha todos os campos";
pub const VEHICLE_ADDED_MESSAGE: &str = "Viatura adicionada com sucesso";
pub const VEHICLE_ADD_FAILED_MESSAGE: &str = "Não foi possível adicionar a viatura";
pub const PHOTO_UPDATED_MESSAGE: &str = "Foto da viatura atualizada";
pub const PHOTO_FAILED_MESSAGE: &str = "Erro ao carregar a foto da viatura";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
}

impl VehicleForm {
    /// Trimmed copy with the plate upper-cased, or the message to show.
    pub fn validate(&self) -> Result<VehicleForm, String> {
        let form = VehicleForm {
            license_plate: self.license_plate.trim().to_uppercase(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            color: self.color.trim().to_string(),
        };
        if form.license_plate.is_empty()
            || form.brand.is_empty()
            || form.model.is_empty()
            || form.color.is_empty()
        {
            return Err(REQUIRED_FIELDS_MESSAGE.into());
        }
        Ok(form)
    }
}

/// A user's first vehicle becomes the primary one.
pub fn primary_for_new_vehicle(existing: &[Vehicle]) -> bool {
    existing.is_empty()
}

pub fn placeholder_photo(brand: &str, model: &str) -> String {
    let text = format!("{} {}", brand, model);
    format!(
        "https://via.placeholder.com/300x300?text={}",
        utf8_percent_encode(&text, NON_ALPHANUMERIC)
    )
}

pub fn new_vehicle(user_id: &str, form: &VehicleForm, existing: &[Vehicle]) -> NewVehicle {
    NewVehicle {
        user_id: user_id.to_string(),
        license_plate: form.license_plate.clone(),
        brand: form.brand.clone(),
        model: form.model.clone(),
        color: form.color.clone(),
        vehicle_photo: placeholder_photo(&form.brand, &form.model),
        is_primary: primary_for_new_vehicle(existing),
    }
}
