/// Output classes of the bundled leaf-disease model, in output order.
pub const DISEASE_CLASSES: [&str; 15] = [
    "Pepper_bell_Bacterial_spot",
    "Pepperbell_healthy",
    "Potato_Early_blight",
    "Potato_Late_blight",
    "Potato_healthy",
    "Tomato_Bacterial_spot",
    "Tomato_Early_blight",
    "Tomato_Late_blight",
    "Tomato_Leaf_Mold",
    "Tomato_Septoria_leaf_spot",
    "Tomato_Spider_mites_Two_spotted_spider_mite",
    "TomatoTarget_Spot",
    "TomatoTomato_YellowLeafCurl_Virus",
    "Tomato_Tomato_mosaic_virus",
    "Tomato_healthy",
];

pub const LABEL_SEPARATOR: char = '_';

pub fn default_labels() -> Vec<String> {
    DISEASE_CLASSES.iter().map(|s| s.to_string()).collect()
}
