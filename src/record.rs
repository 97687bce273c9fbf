use rust_decimal::Decimal;

/// Monetary value used for prices and amounts
///
/// An exact decimal, so cent prices like `9.95` are stored as entered.
pub type Money = Decimal;

/// Possible errors to occur while validating a new purchase
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in Vendor and Item: the vendor is empty")]
    EmptyVendor,
    #[error("Please fill in Vendor and Item: the item is empty")]
    EmptyItem,
    #[error("The quantity has to be at least 1")]
    ZeroQuantity,
    #[error("The price cannot be negative")]
    NegativePrice,
    #[error("The amount of the purchase is too large to be represented")]
    AmountOverflow,
    #[error("The total spending of the log would be too large to be represented")]
    TotalOverflow,
}

/// The raw values of a purchase, as entered by the user
#[derive(Clone, Debug)]
pub struct NewPurchase {
    pub vendor: String,
    pub item: String,
    pub qty: u32,
    pub price: Money,
}

/// One line of the purchase log
///
/// A record can only be created through [`PurchaseRecord::new`], which
/// normalizes the text fields and derives the amount. There is no way to
/// edit a record afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseRecord {
    vendor: String,
    item: String,
    qty: u32,
    #[serde(with = "rust_decimal::serde::str")]
    price: Money,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Money,
}

impl PurchaseRecord {
    /// Validates and normalizes a new purchase
    ///
    /// The vendor is trimmed, the item is trimmed and title cased, and the
    /// amount is computed as `qty * price`.
    pub fn new(purchase: NewPurchase) -> Result<Self, ValidationError> {
        let vendor = purchase.vendor.trim();
        if vendor.is_empty() {
            return Err(ValidationError::EmptyVendor);
        }
        let item = title_case(purchase.item.trim());
        if item.is_empty() {
            return Err(ValidationError::EmptyItem);
        }
        if purchase.qty == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        if purchase.price < Money::ZERO {
            return Err(ValidationError::NegativePrice);
        }
        let amount = purchase.price
            .checked_mul(Money::from(purchase.qty))
            .ok_or(ValidationError::AmountOverflow)?;

        Ok(Self {
            vendor: vendor.to_owned(),
            item,
            qty: purchase.qty,
            price: purchase.price,
            amount,
        })
    }

    /// The vendor the purchase was made at
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// The title cased name of the purchased item
    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// The price of a single unit
    pub fn price(&self) -> Money {
        self.price
    }

    /// The total amount, always `qty * price`
    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// A row as it is stored in the backing file
///
/// The stored amount is only kept to detect rows whose amount disagrees with
/// `qty * price`. Records are always rebuilt through [`PurchaseRecord::new`].
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StoredRecord {
    pub vendor: String,
    pub item: String,
    pub qty: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Money,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Money,
}

impl StoredRecord {
    /// The row as raw input, dropping the stored amount
    pub fn to_purchase(&self) -> NewPurchase {
        NewPurchase {
            vendor: self.vendor.clone(),
            item: self.item.clone(),
            qty: self.qty,
            price: self.price,
        }
    }
}

/// Capitalizes the first letter of every word and lowercases the rest
///
/// A word starts at every letter that does not directly follow another
/// letter, so `"o'neil 2nd desk"` becomes `"O'Neil 2Nd Desk"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            match in_word {
                false => out.extend(c.to_uppercase()),
                true => out.extend(c.to_lowercase()),
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
