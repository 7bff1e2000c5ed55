use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateRoot, DomainError, ProductId, VariantId};
use storefront_events::Event;

use crate::axis::{AxisGrouping, OptionAxis, derive_axis_values, group_into_axes};
use crate::config::InitialSelection;
use crate::resolve::{ResolutionStrategy, resolve_with};
use crate::variant::{ProductVariant, find_variant};
use crate::vocabulary::AxisValue;

/// Aggregate root: the variant selection of one product view.
///
/// Only the selected variant id is stored. Per-axis "current" values are
/// always derived by re-tokenizing the selected SKU, so the highlighted
/// options and the stored selection cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection {
    id: ProductId,
    variants: Vec<ProductVariant>,
    grouping: AxisGrouping,
    selected_variant_id: Option<VariantId>,
    version: u64,
    loaded: bool,
}

impl ProductSelection {
    /// Create an empty selection for a product whose variants are not loaded yet.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            variants: Vec::new(),
            grouping: AxisGrouping::default(),
            selected_variant_id: None,
            version: 0,
            loaded: false,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    /// Option axes, grouped once per product load.
    pub fn axes(&self) -> &[OptionAxis] {
        self.grouping.axes()
    }

    pub fn grouping(&self) -> &AxisGrouping {
        &self.grouping
    }

    pub fn selected_variant_id(&self) -> Option<VariantId> {
        self.selected_variant_id
    }

    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        self.selected_variant_id
            .and_then(|id| find_variant(&self.variants, id))
    }

    /// Current value per axis, derived from the selected variant's SKU.
    pub fn current_values(&self) -> Vec<AxisValue> {
        self.selected_variant()
            .map(|v| derive_axis_values(&v.sku_code))
            .unwrap_or_default()
    }

    /// Whether an option control should render as selected.
    pub fn is_selected(&self, axis: &str, value: &str) -> bool {
        self.current_values()
            .iter()
            .any(|v| v.axis == axis && v.value == value)
    }
}

impl AggregateRoot for ProductSelection {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: LoadVariants.
///
/// Replaces whatever product was loaded before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadVariants {
    pub product_id: ProductId,
    pub variants: Vec<ProductVariant>,
    pub initial_selection: InitialSelection,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectOption (one click on an option control).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub product_id: ProductId,
    pub axis: String,
    pub value: String,
    /// Variant represented by the clicked control.
    pub clicked_variant_id: VariantId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionCommand {
    LoadVariants(LoadVariants),
    SelectOption(SelectOption),
}

/// Event: VariantsLoaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantsLoaded {
    pub product_id: ProductId,
    pub variants: Vec<ProductVariant>,
    pub selected_variant_id: VariantId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OptionSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelected {
    pub product_id: ProductId,
    pub previous_variant_id: VariantId,
    pub selected_variant_id: VariantId,
    pub axis: String,
    pub value: String,
    pub strategy: ResolutionStrategy,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    VariantsLoaded(VariantsLoaded),
    OptionSelected(OptionSelected),
}

impl Event for SelectionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SelectionEvent::VariantsLoaded(_) => "variants.selection.loaded",
            SelectionEvent::OptionSelected(_) => "variants.selection.option_selected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SelectionEvent::VariantsLoaded(e) => e.occurred_at,
            SelectionEvent::OptionSelected(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ProductSelection {
    type Command = SelectionCommand;
    type Event = SelectionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SelectionEvent::VariantsLoaded(e) => {
                self.id = e.product_id;
                self.grouping = group_into_axes(&e.variants);
                self.variants = e.variants.clone();
                self.selected_variant_id = Some(e.selected_variant_id);
                self.loaded = true;
            }
            SelectionEvent::OptionSelected(e) => {
                self.selected_variant_id = Some(e.selected_variant_id);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SelectionCommand::LoadVariants(cmd) => self.handle_load(cmd),
            SelectionCommand::SelectOption(cmd) => self.handle_select(cmd),
        }
    }
}

impl ProductSelection {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn handle_load(&self, cmd: &LoadVariants) -> Result<Vec<SelectionEvent>, DomainError> {
        let mut seen = HashSet::with_capacity(cmd.variants.len());
        if let Some(dup) = cmd.variants.iter().find(|v| !seen.insert(v.id)) {
            return Err(DomainError::validation(format!(
                "duplicate variant id {}",
                dup.id
            )));
        }

        let Some(selected_variant_id) = cmd.initial_selection.pick(&cmd.variants) else {
            return Err(DomainError::unavailable(format!(
                "product {} has no purchasable variants",
                cmd.product_id
            )));
        };

        Ok(vec![SelectionEvent::VariantsLoaded(VariantsLoaded {
            product_id: cmd.product_id,
            variants: cmd.variants.clone(),
            selected_variant_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_select(&self, cmd: &SelectOption) -> Result<Vec<SelectionEvent>, DomainError> {
        if !self.loaded {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;

        if cmd.axis.trim().is_empty() {
            return Err(DomainError::validation("axis cannot be empty"));
        }

        if find_variant(&self.variants, cmd.clicked_variant_id).is_none() {
            return Err(DomainError::validation(format!(
                "clicked variant {} does not belong to product {}",
                cmd.clicked_variant_id, self.id
            )));
        }

        let Some(previous_variant_id) = self.selected_variant_id else {
            return Err(DomainError::invariant("loaded selection has no variant"));
        };

        let resolution = resolve_with(
            &self.grouping,
            previous_variant_id,
            &cmd.axis,
            &cmd.value,
            cmd.clicked_variant_id,
        );

        Ok(vec![SelectionEvent::OptionSelected(OptionSelected {
            product_id: cmd.product_id,
            previous_variant_id,
            selected_variant_id: resolution.variant_id,
            axis: cmd.axis.clone(),
            value: cmd.value.clone(),
            strategy: resolution.strategy,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{COLOR_AXIS, CONNECTION_AXIS};
    use uuid::Uuid;

    fn test_product_id() -> ProductId {
        ProductId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn vid(n: u128) -> VariantId {
        VariantId::from_uuid(Uuid::from_u128(n))
    }

    fn keyboard_variants() -> Vec<ProductVariant> {
        vec![
            ProductVariant::new(vid(1), "KB-SIL-WIF", 12900, true),
            ProductVariant::new(vid(2), "KB-SIL-WIR", 9900, true),
            ProductVariant::new(vid(3), "KB-BLU-WIF", 12900, false),
        ]
    }

    fn load(product_id: ProductId, variants: Vec<ProductVariant>) -> SelectionCommand {
        SelectionCommand::LoadVariants(LoadVariants {
            product_id,
            variants,
            initial_selection: InitialSelection::PreferInStock,
            occurred_at: test_time(),
        })
    }

    fn select(product_id: ProductId, axis: &str, value: &str, clicked: VariantId) -> SelectionCommand {
        SelectionCommand::SelectOption(SelectOption {
            product_id,
            axis: axis.to_string(),
            value: value.to_string(),
            clicked_variant_id: clicked,
            occurred_at: test_time(),
        })
    }

    fn loaded_selection(product_id: ProductId) -> ProductSelection {
        let mut selection = ProductSelection::empty(product_id);
        selection.execute(&load(product_id, keyboard_variants())).unwrap();
        selection
    }

    #[test]
    fn load_variants_selects_first_in_stock_variant() {
        let product_id = test_product_id();
        let mut variants = keyboard_variants();
        variants[0].in_stock = false;

        let selection = ProductSelection::empty(product_id);
        let events = selection.handle(&load(product_id, variants)).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            SelectionEvent::VariantsLoaded(e) => {
                assert_eq!(e.product_id, product_id);
                assert_eq!(e.selected_variant_id, vid(2));
            }
            _ => panic!("Expected VariantsLoaded event"),
        }
        assert_eq!(events[0].event_type(), "variants.selection.loaded");
    }

    #[test]
    fn load_variants_rejects_empty_list() {
        let product_id = test_product_id();
        let selection = ProductSelection::empty(product_id);
        let err = selection.handle(&load(product_id, Vec::new())).unwrap_err();
        match err {
            DomainError::Unavailable(_) => {}
            _ => panic!("Expected Unavailable error for empty variant list"),
        }
    }

    #[test]
    fn load_variants_rejects_duplicate_ids() {
        let product_id = test_product_id();
        let mut variants = keyboard_variants();
        variants[2].id = vid(1);

        let err = ProductSelection::empty(product_id)
            .handle(&load(product_id, variants))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("duplicate")),
            _ => panic!("Expected Validation error for duplicate ids"),
        }
    }

    #[test]
    fn loaded_selection_groups_axes_and_derives_current_values() {
        let product_id = test_product_id();
        let selection = loaded_selection(product_id);

        assert!(selection.is_loaded());
        assert_eq!(selection.version(), 1);
        assert_eq!(selection.axes().len(), 2);
        assert_eq!(selection.selected_variant_id(), Some(vid(1)));
        assert_eq!(
            selection.current_values(),
            vec![
                AxisValue::new(COLOR_AXIS, "Silver"),
                AxisValue::new(CONNECTION_AXIS, "WiFi"),
            ]
        );
        assert!(selection.is_selected(COLOR_AXIS, "Silver"));
        assert!(!selection.is_selected(COLOR_AXIS, "Blue"));
    }

    #[test]
    fn select_option_preserves_other_axes() {
        let product_id = test_product_id();
        let mut selection = loaded_selection(product_id);

        let events = selection
            .execute(&select(product_id, CONNECTION_AXIS, "Wired", vid(2)))
            .unwrap();

        match &events[0] {
            SelectionEvent::OptionSelected(e) => {
                assert_eq!(e.previous_variant_id, vid(1));
                assert_eq!(e.selected_variant_id, vid(2));
                assert_eq!(e.strategy, ResolutionStrategy::Exact);
            }
            _ => panic!("Expected OptionSelected event"),
        }
        assert_eq!(selection.selected_variant().map(|v| v.price), Some(9900));
        assert!(selection.is_selected(CONNECTION_AXIS, "Wired"));
        assert!(selection.is_selected(COLOR_AXIS, "Silver"));
        assert_eq!(selection.version(), 2);
    }

    #[test]
    fn select_option_falls_back_when_combination_is_missing() {
        let product_id = test_product_id();
        let mut selection = loaded_selection(product_id);
        selection
            .execute(&select(product_id, CONNECTION_AXIS, "Wired", vid(2)))
            .unwrap();

        // Blue only exists as WiFi, so Connection has to change too.
        let events = selection
            .execute(&select(product_id, COLOR_AXIS, "Blue", vid(3)))
            .unwrap();
        match &events[0] {
            SelectionEvent::OptionSelected(e) => {
                assert_eq!(e.selected_variant_id, vid(3));
                assert_eq!(e.strategy, ResolutionStrategy::Fallback { score: 0 });
            }
            _ => panic!("Expected OptionSelected event"),
        }
        assert!(selection.is_selected(CONNECTION_AXIS, "WiFi"));
    }

    #[test]
    fn select_option_requires_loaded_variants() {
        let product_id = test_product_id();
        let selection = ProductSelection::empty(product_id);
        let err = selection
            .handle(&select(product_id, COLOR_AXIS, "Blue", vid(3)))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn select_option_rejects_other_product() {
        let selection = loaded_selection(test_product_id());
        let err = selection
            .handle(&select(test_product_id(), COLOR_AXIS, "Blue", vid(3)))
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected invariant violation for product mismatch"),
        }
    }

    #[test]
    fn select_option_rejects_foreign_clicked_variant() {
        let product_id = test_product_id();
        let selection = loaded_selection(product_id);
        let err = selection
            .handle(&select(product_id, COLOR_AXIS, "Blue", vid(42)))
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for unknown clicked variant"),
        }
    }

    #[test]
    fn loading_another_product_discards_previous_selection() {
        let first = test_product_id();
        let mut selection = loaded_selection(first);
        selection
            .execute(&select(first, CONNECTION_AXIS, "Wired", vid(2)))
            .unwrap();

        let second = test_product_id();
        selection
            .execute(&load(
                second,
                vec![ProductVariant::new(vid(10), "CASE-RED", 1500, true)],
            ))
            .unwrap();

        assert_eq!(selection.product_id(), second);
        assert_eq!(selection.selected_variant_id(), Some(vid(10)));
        assert_eq!(selection.axes().len(), 1);
        assert_eq!(selection.version(), 3);
    }

    #[test]
    fn events_serialize_for_the_ui_layer() {
        let product_id = test_product_id();
        let selection = loaded_selection(product_id);
        let events = selection
            .handle(&select(product_id, COLOR_AXIS, "Blue", vid(3)))
            .unwrap();

        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["OptionSelected"]["axis"], "Color");
        assert_eq!(json["OptionSelected"]["strategy"]["kind"], "exact");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: handle is deterministic and never mutates state.
            #[test]
            fn handle_is_deterministic(
                axis in prop::sample::select(vec![COLOR_AXIS, CONNECTION_AXIS, "Options"]),
                value in "[A-Za-z]{1,8}",
                clicked in 1u128..=3,
            ) {
                let product_id = test_product_id();
                let selection = loaded_selection(product_id);
                let before = selection.clone();

                let cmd = SelectionCommand::SelectOption(SelectOption {
                    product_id,
                    axis: axis.to_string(),
                    value: value.clone(),
                    clicked_variant_id: vid(clicked),
                    occurred_at: test_time(),
                });

                let events1 = selection.handle(&cmd).unwrap();
                let events2 = selection.handle(&cmd).unwrap();

                prop_assert_eq!(&before, &selection);
                prop_assert_eq!(events1, events2);
            }

            /// Property: the stored selection always belongs to the loaded list.
            #[test]
            fn selection_stays_within_loaded_variants(
                clicks in prop::collection::vec(
                    (
                        prop::sample::select(vec![COLOR_AXIS, CONNECTION_AXIS]),
                        prop::sample::select(vec!["Silver", "Blue", "WiFi", "Wired", "Red"]),
                        1u128..=3,
                    ),
                    1..10,
                ),
            ) {
                let product_id = test_product_id();
                let mut selection = loaded_selection(product_id);

                for (axis, value, clicked) in clicks {
                    selection.execute(&select(product_id, axis, value, vid(clicked))).unwrap();
                    prop_assert!(selection.selected_variant().is_some());
                }
                prop_assert!(!selection.current_values().is_empty());
            }
        }
    }
}
