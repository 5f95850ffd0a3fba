//! Modal forms
//!
//! Each modal is a short-lived state machine gating exactly one mutation:
//!
//! - [`PickerModal`]: a placeholder couple picks a category and names a dish
//! - [`EditModal`]: a persisted card gets a new dish name or allergy note
//! - [`AddDishModal`]: a brand-new couple and dish are entered by hand
//!
//! Submission is validated client-side; an invalid form never produces a
//! [`Mutation`], so no request is issued.

use thiserror::Error;

use super::mutation::Mutation;
use super::types::{
    normalize_dietary, roster_slot, Card, CardUpdate, Category, NewCard, NO_RESTRICTION,
};

/// Client-side validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Dish name is required")]
    MissingDish,

    #[error("Couple name is required")]
    MissingCouple,

    #[error("Please choose a category")]
    MissingCategory,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("This form has no {0} field")]
    NoSuchField(&'static str),
}

/// Category + dish picker for a placeholder couple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerModal {
    pub placeholder_id: String,
    pub couple_name: String,
    pub dish_name: String,
    pub category_id: Option<String>,
    pub dietary_restrictions: String,
}

impl PickerModal {
    /// Open the picker; the dish is pre-filled unless it is still the prompt
    pub fn open(placeholder: &Card) -> Self {
        Self {
            placeholder_id: placeholder.id.clone(),
            couple_name: placeholder.couple_name.clone(),
            dish_name: placeholder.provisional_dish().unwrap_or_default().to_string(),
            category_id: None,
            dietary_restrictions: placeholder.dietary_warning().unwrap_or_default().to_string(),
        }
    }

    /// Select one of the four fixed categories
    pub fn select_category(&mut self, category_id: &str) -> Result<(), ValidationError> {
        let slot = roster_slot(category_id)
            .ok_or_else(|| ValidationError::UnknownCategory(category_id.to_string()))?;
        self.category_id = Some(slot.id.to_string());
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn submit(&self) -> Result<Mutation, ValidationError> {
        let category_id = self.validate()?;
        Ok(Mutation::Create(NewCard {
            couple_name: self.couple_name.clone(),
            dish_name: self.dish_name.trim().to_string(),
            dietary_restrictions: self.dietary_restrictions.trim().to_string(),
            category_id,
        }))
    }

    fn validate(&self) -> Result<String, ValidationError> {
        let category_id = self
            .category_id
            .clone()
            .ok_or(ValidationError::MissingCategory)?;
        if self.dish_name.trim().is_empty() {
            return Err(ValidationError::MissingDish);
        }
        Ok(category_id)
    }
}

/// Dish and allergy editor for a persisted card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal {
    pub card_id: String,
    pub couple_name: String,
    pub dish_name: String,
    pub dietary_restrictions: String,
}

impl EditModal {
    pub fn open(card: &Card) -> Self {
        Self {
            card_id: card.id.clone(),
            couple_name: card.couple_name.clone(),
            dish_name: card.dish_name.clone(),
            dietary_restrictions: card.dietary_restrictions.clone(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.dish_name.trim().is_empty()
    }

    /// Partial update of dish and dietary text; never touches the category
    pub fn submit(&self) -> Result<Mutation, ValidationError> {
        if !self.can_submit() {
            return Err(ValidationError::MissingDish);
        }
        Ok(Mutation::Update {
            card_id: self.card_id.clone(),
            update: CardUpdate {
                dish_name: Some(self.dish_name.trim().to_string()),
                dietary_restrictions: Some(self.dietary_restrictions.trim().to_string()),
            },
        })
    }
}

/// Free-form "add new dish" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDishModal {
    pub couple_name: String,
    pub dish_name: String,
    pub dietary_restrictions: String,
    pub category_id: Option<String>,
}

impl Default for AddDishModal {
    fn default() -> Self {
        Self {
            couple_name: String::new(),
            dish_name: String::new(),
            dietary_restrictions: NO_RESTRICTION.to_string(),
            category_id: None,
        }
    }
}

impl AddDishModal {
    /// Select any category currently on the board
    pub fn select_category(
        &mut self,
        category_id: &str,
        categories: &[Category],
    ) -> Result<(), ValidationError> {
        if !categories.iter().any(|c| c.id == category_id) {
            return Err(ValidationError::UnknownCategory(category_id.to_string()));
        }
        self.category_id = Some(category_id.to_string());
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.submit().is_ok()
    }

    pub fn submit(&self) -> Result<Mutation, ValidationError> {
        if self.couple_name.trim().is_empty() {
            return Err(ValidationError::MissingCouple);
        }
        if self.dish_name.trim().is_empty() {
            return Err(ValidationError::MissingDish);
        }
        let category_id = self
            .category_id
            .clone()
            .ok_or(ValidationError::MissingCategory)?;

        Ok(Mutation::Create(NewCard {
            couple_name: self.couple_name.trim().to_string(),
            dish_name: self.dish_name.trim().to_string(),
            dietary_restrictions: self.dietary_restrictions.trim().to_string(),
            category_id,
        }))
    }
}

/// Field a modal input is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalField {
    Couple,
    Dish,
    Dietary,
}

/// The currently open modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Picker(PickerModal),
    Edit(EditModal),
    AddDish(AddDishModal),
}

impl Modal {
    pub fn title(&self) -> String {
        match self {
            Modal::Picker(m) => format!("What's {} bringing?", m.couple_name),
            Modal::Edit(m) => format!("Edit {}'s Dish", m.couple_name),
            Modal::AddDish(_) => "Add New Dish".to_string(),
        }
    }

    /// Overwrite a text field
    pub fn set_field(&mut self, field: ModalField, value: &str) -> Result<(), ValidationError> {
        let slot = match (self, field) {
            (Modal::Picker(m), ModalField::Dish) => &mut m.dish_name,
            (Modal::Picker(m), ModalField::Dietary) => &mut m.dietary_restrictions,
            (Modal::Edit(m), ModalField::Dish) => &mut m.dish_name,
            (Modal::Edit(m), ModalField::Dietary) => &mut m.dietary_restrictions,
            (Modal::AddDish(m), ModalField::Couple) => &mut m.couple_name,
            (Modal::AddDish(m), ModalField::Dish) => &mut m.dish_name,
            (Modal::AddDish(m), ModalField::Dietary) => &mut m.dietary_restrictions,
            (_, ModalField::Couple) => return Err(ValidationError::NoSuchField("couple")),
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn select_category(
        &mut self,
        category_id: &str,
        categories: &[Category],
    ) -> Result<(), ValidationError> {
        match self {
            Modal::Picker(m) => m.select_category(category_id),
            Modal::AddDish(m) => m.select_category(category_id, categories),
            Modal::Edit(_) => Err(ValidationError::NoSuchField("category")),
        }
    }

    pub fn can_submit(&self) -> bool {
        match self {
            Modal::Picker(m) => m.can_submit(),
            Modal::Edit(m) => m.can_submit(),
            Modal::AddDish(m) => m.can_submit(),
        }
    }

    pub fn submit(&self) -> Result<Mutation, ValidationError> {
        match self {
            Modal::Picker(m) => m.submit(),
            Modal::Edit(m) => m.submit(),
            Modal::AddDish(m) => m.submit(),
        }
    }

    /// Dietary text as the card would show it
    pub fn dietary_preview(&self) -> Option<&str> {
        let text = match self {
            Modal::Picker(m) => &m.dietary_restrictions,
            Modal::Edit(m) => &m.dietary_restrictions,
            Modal::AddDish(m) => &m.dietary_restrictions,
        };
        normalize_dietary(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(dish: &str, dietary: &str) -> Card {
        Card {
            id: "a1b2".to_string(),
            couple_name: "Krass".to_string(),
            dish_name: dish.to_string(),
            dietary_restrictions: dietary.to_string(),
            category_id: "sides".to_string(),
            created_at: "2026-02-08T18:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_picker_prompt_dish_is_not_prefilled() {
        let picker = PickerModal::open(&Card::placeholder("Steinberg"));
        assert_eq!(picker.dish_name, "");
        assert_eq!(picker.dietary_restrictions, "");
        assert!(picker.category_id.is_none());
    }

    #[test]
    fn test_picker_named_dish_is_prefilled() {
        let mut placeholder = Card::placeholder("Steinberg");
        placeholder.dish_name = "Chili".to_string();
        assert_eq!(PickerModal::open(&placeholder).dish_name, "Chili");
    }

    #[test]
    fn test_picker_requires_category_and_dish() {
        let mut picker = PickerModal::open(&Card::placeholder("Steinberg"));
        assert_eq!(picker.submit(), Err(ValidationError::MissingCategory));

        picker.select_category("main").unwrap();
        assert_eq!(picker.submit(), Err(ValidationError::MissingDish));

        picker.dish_name = "   ".to_string();
        assert!(!picker.can_submit());

        picker.dish_name = " Chili ".to_string();
        assert!(picker.can_submit());
    }

    #[test]
    fn test_picker_rejects_unknown_category() {
        let mut picker = PickerModal::open(&Card::placeholder("Krass"));
        assert_eq!(
            picker.select_category("drinks"),
            Err(ValidationError::UnknownCategory("drinks".to_string()))
        );
        assert!(picker.category_id.is_none());
    }

    #[test]
    fn test_picker_submit_payload() {
        let mut picker = PickerModal::open(&Card::placeholder("Steinberg"));
        picker.dish_name = "Chili".to_string();
        picker.select_category("main").unwrap();

        assert_eq!(
            picker.submit().unwrap(),
            Mutation::Create(NewCard {
                couple_name: "Steinberg".to_string(),
                dish_name: "Chili".to_string(),
                dietary_restrictions: String::new(),
                category_id: "main".to_string(),
            })
        );
    }

    #[test]
    fn test_edit_prefills_and_updates() {
        let mut edit = EditModal::open(&persisted("Salad", "nuts"));
        assert_eq!(edit.dish_name, "Salad");
        assert_eq!(edit.dietary_restrictions, "nuts");

        edit.dish_name = " Caesar Salad ".to_string();
        edit.dietary_restrictions = "".to_string();

        assert_eq!(
            edit.submit().unwrap(),
            Mutation::Update {
                card_id: "a1b2".to_string(),
                update: CardUpdate {
                    dish_name: Some("Caesar Salad".to_string()),
                    dietary_restrictions: Some(String::new()),
                },
            }
        );
    }

    #[test]
    fn test_edit_rejects_blank_dish() {
        let mut edit = EditModal::open(&persisted("Salad", ""));
        edit.dish_name = "  ".to_string();
        assert_eq!(edit.submit(), Err(ValidationError::MissingDish));
    }

    #[test]
    fn test_add_dish_requires_all_fields() {
        let categories = vec![Category::new("sides", "Sides", 3)];
        let mut form = AddDishModal::default();
        assert_eq!(form.dietary_restrictions, "None");
        assert_eq!(form.submit(), Err(ValidationError::MissingCouple));

        form.couple_name = "John & Jane".to_string();
        assert_eq!(form.submit(), Err(ValidationError::MissingDish));

        form.dish_name = "Buffalo Wings".to_string();
        assert_eq!(form.submit(), Err(ValidationError::MissingCategory));

        assert!(form.select_category("main", &categories).is_err());
        form.select_category("sides", &categories).unwrap();
        assert!(form.can_submit());
    }

    #[test]
    fn test_modal_field_routing() {
        let mut modal = Modal::Edit(EditModal::open(&persisted("Salad", "")));
        assert_eq!(
            modal.set_field(ModalField::Couple, "x"),
            Err(ValidationError::NoSuchField("couple"))
        );
        assert_eq!(
            modal.select_category("main", &[]),
            Err(ValidationError::NoSuchField("category"))
        );

        modal.set_field(ModalField::Dietary, "dairy").unwrap();
        assert_eq!(modal.dietary_preview(), Some("dairy"));
        assert_eq!(modal.title(), "Edit Krass's Dish");
    }
}
