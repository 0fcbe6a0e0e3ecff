use serde::{Deserialize, Serialize};

/// Two-counter stock tracking for a product.
///
/// `stock` is the number of units the shop owns; `available_stock` is what is
/// left after carts have reserved units. Reservations move units between the
/// two views without touching `stock`; only a commit (a sale) or a catalog
/// edit changes `stock`. `available_stock <= stock` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StockCounters")]
pub struct StockLevel {
    stock: u32,
    available_stock: u32,
}

#[derive(Deserialize)]
struct StockCounters {
    stock: u32,
    available_stock: u32,
}

impl TryFrom<StockCounters> for StockLevel {
    type Error = InventoryError;

    fn try_from(raw: StockCounters) -> Result<Self, Self::Error> {
        if raw.available_stock > raw.stock {
            return Err(InventoryError::Inconsistent {
                stock: raw.stock,
                available: raw.available_stock,
            });
        }
        Ok(Self {
            stock: raw.stock,
            available_stock: raw.available_stock,
        })
    }
}

impl StockLevel {
    /// Fresh stock with nothing reserved.
    pub fn new(stock: u32) -> Self {
        Self {
            stock,
            available_stock: stock,
        }
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn available(&self) -> u32 {
        self.available_stock
    }

    /// Units currently held by carts.
    pub fn reserved(&self) -> u32 {
        self.stock - self.available_stock
    }

    /// Reserve units for a cart.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), InventoryError> {
        if self.available_stock < quantity {
            return Err(InventoryError::InsufficientStock {
                requested: quantity,
                available: self.available_stock,
            });
        }

        self.available_stock -= quantity;
        Ok(())
    }

    /// Hand reserved units back (line reduced or removed).
    pub fn release(&mut self, quantity: u32) -> Result<(), InventoryError> {
        let reserved = self.reserved();
        if reserved < quantity {
            return Err(InventoryError::InsufficientReserved {
                requested: quantity,
                reserved,
            });
        }

        self.available_stock += quantity;
        Ok(())
    }

    /// Turn reserved units into a sale. Available stock already excludes
    /// them, so only the total goes down.
    pub fn commit(&mut self, quantity: u32) -> Result<(), InventoryError> {
        self.check_commit(quantity)?;
        self.stock -= quantity;
        Ok(())
    }

    /// Validate a commit without applying it.
    pub fn check_commit(&self, quantity: u32) -> Result<(), InventoryError> {
        let reserved = self.reserved();
        if reserved < quantity {
            return Err(InventoryError::InsufficientReserved {
                requested: quantity,
                reserved,
            });
        }
        Ok(())
    }

    /// Catalog edit of the total. Reserved units stay reserved, so the new
    /// total may not drop below them.
    pub fn resize(&mut self, stock: u32) -> Result<(), InventoryError> {
        let reserved = self.reserved();
        if stock < reserved {
            return Err(InventoryError::BelowReserved { stock, reserved });
        }

        self.stock = stock;
        self.available_stock = stock - reserved;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: u32,
        available: u32,
    },

    #[error("Insufficient reserved stock: requested {requested}, reserved {reserved}")]
    InsufficientReserved {
        requested: u32,
        reserved: u32,
    },

    #[error("Stock {stock} is below the {reserved} units currently reserved")]
    BelowReserved {
        stock: u32,
        reserved: u32,
    },

    #[error("Available stock {available} exceeds total stock {stock}")]
    Inconsistent {
        stock: u32,
        available: u32,
    },
}
