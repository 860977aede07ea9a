//! Pizzas
//!
//! A [`PizzaConfiguration`] is a plain value: every scalar attribute is drawn from a closed set,
//! and toppings are kept in the order the customer picked them.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Declares a closed attribute set whose variants serialise to their menu strings.
macro_rules! attribute {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $wire]
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Menu string for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

attribute! {
    /// How much cheese goes on the pizza.
    CheeseAmount {
        Regular => "Regular",
        Extra => "Extra",
        Light => "Light",
        None => "None",
    }
}

attribute! {
    /// Named combination the pizza is based on.
    ComboName {
        Cheese => "Cheese",
        Pepperoni => "Pepperoni",
        MeatLovers => "Meat Lover's",
        Supreme => "Supreme",
        PepperoniLovers => "Pepperoni Lover's",
        SuperSupreme => "Super Supreme",
        VeggieLovers => "Veggie Lover's",
        UltimateCheeseLovers => "Ultimate Cheese Lover's",
        BuffaloChicken => "Buffalo Chicken",
        BbqChicken => "BBQ Chicken",
        HawaiianChicken => "Hawaiian Chicken",
        ChickenBaconParmesan => "Chicken Bacon Parmesan",
    }
}

attribute! {
    /// Crust style.
    Crust {
        HandTossed => "Hand Tossed",
        ThinNCrispy => "Thin 'N Crispy",
        OriginalPan => "Original Pan",
    }
}

attribute! {
    /// Flavouring brushed onto the crust.
    CrustFlavor {
        NoCrustFlavor => "No Crust Flavor",
        GarlicButteryBlend => "Garlic Buttery Blend",
        ToastedParmesan => "Toasted Parmesan",
    }
}

attribute! {
    /// Meat topping names.
    MeatName {
        Pepperoni => "Pepperoni",
        ItalianSausage => "Italian Sausage",
        Ham => "Ham",
        Bacon => "Bacon",
        GrilledChicken => "Grilled Chicken",
        Beef => "Beef",
        Pork => "Pork",
    }
}

attribute! {
    /// Veggie topping names.
    VeggieName {
        Mushrooms => "Mushrooms",
        RoastedSpinach => "Roasted Spinach",
        RedOnions => "Red Onions",
        MediterraneanBlackOlives => "Mediterranean Black Olives",
        GreenBellPeppers => "Green Bell Peppers",
        BananaPeppers => "Banana Peppers",
        Pineapple => "Pineapple",
        JalapenoPeppers => "Jalapeno Peppers",
        RomaTomatoes => "Roma Tomatoes",
    }
}

attribute! {
    /// How heavily a topping is applied.
    ToppingAmount {
        Extra => "Extra Topping",
        Regular => "Regular Topping",
    }
}

attribute! {
    /// Which part of the pizza a topping covers.
    ToppingPortion {
        Whole => "Whole",
        LeftHalf => "Left Half",
        RightHalf => "Right Half",
    }
}

attribute! {
    /// Pricing scheme applied at checkout.
    PriceType {
        Regular => "Regular",
        Combo => "Combo",
    }
}

attribute! {
    /// Sauce base.
    Sauce {
        ClassicMarinara => "Classic Marinara",
        CreamyGarlicParmesan => "Creamy Garlic Parmesan",
        Barbeque => "Barbeque",
        Buffalo => "Buffalo",
    }
}

attribute! {
    /// How much sauce goes on the pizza.
    SauceAmount {
        Regular => "Regular",
        Extra => "Extra",
        Light => "Light",
        None => "None",
    }
}

attribute! {
    /// Pizza size.
    Size {
        Large => "Large",
        Medium => "Medium",
        Personal => "Personal",
    }
}

/// A single topping choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topping<N> {
    /// Topping name
    pub topping_name: N,

    /// Topping amount
    pub amount: ToppingAmount,

    /// Portion of the pizza covered
    pub portion: ToppingPortion,
}

impl<N> Topping<N> {
    /// Create a new topping.
    pub const fn new(topping_name: N, amount: ToppingAmount, portion: ToppingPortion) -> Self {
        Self {
            topping_name,
            amount,
            portion,
        }
    }
}

/// Meat topping
pub type MeatTopping = Topping<MeatName>;

/// Veggie topping
pub type VeggieTopping = Topping<VeggieName>;

/// Full configuration of one pizza.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaConfiguration {
    /// Cheese amount
    pub cheese_amount: CheeseAmount,

    /// Combo the pizza is based on
    pub combo_name: ComboName,

    /// Crust style
    pub crust: Crust,

    /// Crust flavour
    pub crust_flavor: CrustFlavor,

    /// Meat toppings, in the order they were chosen
    #[serde(default)]
    pub meats: SmallVec<[MeatTopping; 4]>,

    /// Veggie toppings, in the order they were chosen
    #[serde(default)]
    pub veggies: SmallVec<[VeggieTopping; 4]>,

    /// Pricing scheme
    pub price_type: PriceType,

    /// Sauce base
    pub sauce: Sauce,

    /// Sauce amount
    pub sauce_amount: SauceAmount,

    /// Size
    pub size: Size,
}

impl PizzaConfiguration {
    /// Short human-readable label, e.g. `Large Hand Tossed Pepperoni`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}", self.size, self.crust, self.combo_name)
    }

    /// Number of toppings across both lists.
    #[must_use]
    pub fn topping_count(&self) -> usize {
        self.meats.len() + self.veggies.len()
    }
}
