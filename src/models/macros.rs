use serde::{Deserialize, Serialize};

/// A macronutrient vector in grams: carbohydrate, protein, fat.
///
/// Used both as a target ("hit these amounts") and as an achieved total.
/// Values are non-negative by construction, but subtraction during
/// remaining-budget accounting may take an axis below zero; a negative
/// value means "already exceeded, no more needed" rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// One axis of a macro vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroAxis {
    Carbs,
    Protein,
    Fat,
}

impl MacroTarget {
    pub fn new(carbs: f64, protein: f64, fat: f64) -> Self {
        Self {
            carbs,
            protein,
            fat,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every axis by the same factor.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            carbs: self.carbs * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
        }
    }

    /// Scale each axis by its own factor.
    pub fn scaled_per_axis(self, carbs: f64, protein: f64, fat: f64) -> Self {
        Self {
            carbs: self.carbs * carbs,
            protein: self.protein * protein,
            fat: self.fat * fat,
        }
    }

    pub fn add(&mut self, other: Self) {
        self.carbs += other.carbs;
        self.protein += other.protein;
        self.fat += other.fat;
    }

    pub fn subtract(&mut self, other: Self) {
        self.carbs -= other.carbs;
        self.protein -= other.protein;
        self.fat -= other.fat;
    }

    /// Gap vector: `self - other` per axis.
    pub fn minus(self, other: Self) -> Self {
        Self {
            carbs: self.carbs - other.carbs,
            protein: self.protein - other.protein,
            fat: self.fat - other.fat,
        }
    }

    /// Largest absolute deviation across the three axes.
    pub fn max_abs_diff(self, other: Self) -> f64 {
        (self.carbs - other.carbs)
            .abs()
            .max((self.protein - other.protein).abs())
            .max((self.fat - other.fat).abs())
    }

    /// True when every axis is within `tolerance_grams` of `target`.
    pub fn within_tolerance(self, target: Self, tolerance_grams: f64) -> bool {
        self.max_abs_diff(target) <= tolerance_grams
    }

    /// The axis with the largest positive gap, with its value.
    ///
    /// Returns None when no axis has a positive gap (target already met
    /// or exceeded everywhere).
    pub fn largest_positive_axis(self) -> Option<(MacroAxis, f64)> {
        let axes = [
            (MacroAxis::Carbs, self.carbs),
            (MacroAxis::Protein, self.protein),
            (MacroAxis::Fat, self.fat),
        ];

        axes.into_iter()
            .filter(|(_, v)| *v > 0.0)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn axis(self, axis: MacroAxis) -> f64 {
        match axis {
            MacroAxis::Carbs => self.carbs,
            MacroAxis::Protein => self.protein,
            MacroAxis::Fat => self.fat,
        }
    }
}

impl std::fmt::Display for MacroTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1}g carbs, {:.1}g protein, {:.1}g fat",
            self.carbs, self.protein, self.fat
        )
    }
}
