use crate::core::errors::DecisionError;
use serde::{Deserialize, Serialize};

/// Order `quantity` units of the material at position `material` among
/// the configured materials (id order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialOrder {
    pub material: usize,
    pub quantity: i64,
}

/// Everything the decision-maker does in one step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub orders: Vec<MaterialOrder>,
}

impl Decision {
    /// Place no orders this step
    pub fn none() -> Self {
        Self::default()
    }

    pub fn order(material: usize, quantity: i64) -> Self {
        Self::none().and_order(material, quantity)
    }

    pub fn and_order(mut self, material: usize, quantity: i64) -> Self {
        self.orders.push(MaterialOrder { material, quantity });
        self
    }

    /// Decode a single discrete action: the action value is the order
    /// quantity and `action % material_count` the material it addresses
    pub fn from_discrete_action(action: i64, material_count: usize) -> Result<Self, DecisionError> {
        if material_count == 0 {
            return Err(DecisionError::UnknownMaterial { index: 0, count: 0 });
        }
        let material = action.rem_euclid(material_count as i64) as usize;
        if action < 0 {
            return Err(DecisionError::NegativeQuantity {
                material,
                quantity: action,
            });
        }
        Ok(Self::order(material, action))
    }

    /// Check every order against the environment's bounds, returning the
    /// accepted (material, quantity) pairs
    pub fn validate(&self, material_count: usize, max_quantity: u64) -> Result<Vec<(usize, u64)>, DecisionError> {
        self.orders
            .iter()
            .map(|order| {
                if order.material >= material_count {
                    return Err(DecisionError::UnknownMaterial {
                        index: order.material,
                        count: material_count,
                    });
                }
                if order.quantity < 0 {
                    return Err(DecisionError::NegativeQuantity {
                        material: order.material,
                        quantity: order.quantity,
                    });
                }
                let quantity = order.quantity as u64;
                if quantity > max_quantity {
                    return Err(DecisionError::QuantityAboveMax {
                        material: order.material,
                        quantity: order.quantity,
                        max: max_quantity,
                    });
                }
                Ok((order.material, quantity))
            })
            .collect()
    }
}
