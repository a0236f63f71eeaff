use fake::Fake;
use rand::Rng;

use super::locales::LocaleKey;

/// Produces plausible person fields for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonFaker {
    locale: LocaleKey,
}

impl PersonFaker {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    pub fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => fake::faker::name::en::Name().fake_with_rng(rng),
            LocaleKey::PtBr => fake::faker::name::pt_br::Name().fake_with_rng(rng),
        }
    }

    /// Single-line postal address in the locale's usual layout.
    pub fn address<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => {
                use fake::faker::address::en::{
                    BuildingNumber, CityName, StateAbbr, StreetName, ZipCode,
                };
                let building: String = BuildingNumber().fake_with_rng(rng);
                let street: String = StreetName().fake_with_rng(rng);
                let city: String = CityName().fake_with_rng(rng);
                let state: String = StateAbbr().fake_with_rng(rng);
                let zip: String = ZipCode().fake_with_rng(rng);
                format!("{building} {street}, {city}, {state} {zip}")
            }
            LocaleKey::PtBr => {
                use fake::faker::address::pt_br::{
                    BuildingNumber, CityName, StateAbbr, StreetName, ZipCode,
                };
                let street: String = StreetName().fake_with_rng(rng);
                let building: String = BuildingNumber().fake_with_rng(rng);
                let city: String = CityName().fake_with_rng(rng);
                let state: String = StateAbbr().fake_with_rng(rng);
                let zip: String = ZipCode().fake_with_rng(rng);
                format!("{street}, {building} - {city}/{state}, {zip}")
            }
        }
    }

    pub fn phone<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => fake::faker::phone_number::en::PhoneNumber().fake_with_rng(rng),
            LocaleKey::PtBr => fake::faker::phone_number::pt_br::PhoneNumber().fake_with_rng(rng),
        }
    }
}
