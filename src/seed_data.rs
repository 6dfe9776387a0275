//! Fixed lookup rows every deployment starts with.

pub const CATEGORIES: &[&str] = &[
    "Main Dish",
    "Side Dish",
    "Salad",
    "Soup",
    "Noodle",
    "Grilled or Roasted",
    "Fried",
    "Dessert",
    "Snack",
    "Bread",
];

pub const CUISINES: &[&str] = &[
    "American",
    "Japanese",
    "Korean",
    "Chinese",
    "Indian",
    "Vietnamese",
    "Italian",
    "French",
    "Mexican",
    "Spanish",
    "Thai",
    "Greek",
    "Turkish",
    "Russian",
    "German",
    "Brazilian",
    "Middle Eastern",
    "African",
    "British",
];

/// `(name, description)` pairs.
pub const DIETARY_RESTRICTIONS: &[(&str, &str)] = &[
    (
        "Vegetarian",
        "A diet that excludes animal meat, generally including vegetables, fruits, grains, and nuts. Dairy and eggs are usually allowed.",
    ),
    ("Vegan", "A diet that excludes all animal products."),
    (
        "Gluten-Free",
        "A diet excluding foods containing gluten, such as wheat, barley, and rye.",
    ),
    (
        "Lacto-Ovo Vegetarian",
        "A vegetarian diet that includes dairy and eggs but excludes meat.",
    ),
    (
        "Lacto Vegetarian",
        "A vegetarian diet that includes dairy but excludes eggs and meat.",
    ),
    (
        "Ovo Vegetarian",
        "A vegetarian diet that includes eggs but excludes dairy and meat.",
    ),
    (
        "Low-Calorie",
        "A diet focused on reducing calorie intake, often including low-fat and low-carb foods.",
    ),
    (
        "Low-Fat",
        "A diet that reduces fat intake, including lean proteins and vegetables instead of high-fat foods.",
    ),
    (
        "Low-Carb",
        "A diet that reduces carbohydrate intake, often emphasizing protein and healthy fats.",
    ),
    (
        "High-Protein",
        "A diet high in protein, which can be beneficial for athletes or individuals building muscle.",
    ),
    (
        "Kosher",
        "A diet following Jewish dietary laws, avoiding specific animals and the mixing of meat and dairy.",
    ),
    (
        "Halal",
        "A diet that follows Islamic dietary laws, avoiding prohibited items like pork and alcohol.",
    ),
    (
        "Lactose-Free",
        "A diet for individuals who are lactose-intolerant, excluding lactose-containing dairy products.",
    ),
    (
        "Nut-Free",
        "A diet excluding all types of nuts for individuals with nut allergies.",
    ),
    (
        "Low-Sodium",
        "A diet that reduces sodium intake, beneficial for hypertension or heart disease prevention.",
    ),
];

pub const DEMO_USER_EMAIL: &str = "demo@nutrichef.dev";
pub const DEMO_USER_PASSWORD: &str = "nutrichef-demo";
