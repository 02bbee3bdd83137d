use crate::error::ParseError;
use crate::series::Field;
use crate::DT_FORMAT;
use chrono::NaiveDateTime;
use regex::{Captures, Regex};

/// Tagged record emitted by the BC-601, from `DT` (date) to `ww` (body water).
/// Tags and their order are fixed; decimals carry exactly one fractional digit.
const LINE_PATTERN: &str = concat!(
    r#"DT,"(?P<date>[0-9/]+)",Ti,"(?P<time>[0-9:]+)","#,
    r#"Bt,(?P<body_type>[02]),GE,(?P<gender>[12]),AG,(?P<age>\d+),"#,
    r#"Hm,(?P<height>\d+\.\d),AL,(?P<activity_level>[123]),"#,
    r#"Wk,(?P<weight>\d+\.\d),MI,(?P<bmi>\d+\.\d),"#,
    r#"FW,(?P<fat>\d+\.\d),Fr,(?P<fat_right_arm>\d+\.\d),Fl,(?P<fat_left_arm>\d+\.\d),"#,
    r#"FR,(?P<fat_right_leg>\d+\.\d),FL,(?P<fat_left_leg>\d+\.\d),FT,(?P<fat_trunk>\d+\.\d),"#,
    r#"mW,(?P<muscle>\d+\.\d),mr,(?P<muscle_right_arm>\d+\.\d),ml,(?P<muscle_left_arm>\d+\.\d),"#,
    r#"mR,(?P<muscle_right_leg>\d+\.\d),mL,(?P<muscle_left_leg>\d+\.\d),mT,(?P<muscle_trunk>\d+\.\d),"#,
    r#"bW,(?P<bone_mass>\d+\.\d),IF,(?P<visceral_fat>\d+),rD,(?P<calories>\d+),"#,
    r#"rA,(?P<metabolic_age>\d+),ww,(?P<water>\d+\.\d)"#,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Standard,
    Athletic,
}

impl BodyType {
    pub fn from_code(code: &str) -> Result<BodyType, ParseError> {
        match code {
            "0" => Ok(BodyType::Standard),
            "2" => Ok(BodyType::Athletic),
            _ => Err(ParseError::Code {
                tag: "Bt",
                code: code.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BodyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyType::Standard => write!(f, "standard"),
            BodyType::Athletic => write!(f, "athletic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_code(code: &str) -> Result<Gender, ParseError> {
        match code {
            "1" => Ok(Gender::Male),
            "2" => Ok(Gender::Female),
            _ => Err(ParseError::Code {
                tag: "GE",
                code: code.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// One reading of the scale, i.e., one parsed line.
/// Fat and muscle are given as total and per body region.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub timestamp: NaiveDateTime,
    pub body_type: BodyType,
    pub gender: Gender,
    pub age: u32,
    pub height: f64,
    pub activity_level: u32,
    pub weight: f64,
    pub bmi: f64,
    pub fat: f64,
    pub fat_right_arm: f64,
    pub fat_left_arm: f64,
    pub fat_right_leg: f64,
    pub fat_left_leg: f64,
    pub fat_trunk: f64,
    pub muscle: f64,
    pub muscle_right_arm: f64,
    pub muscle_left_arm: f64,
    pub muscle_right_leg: f64,
    pub muscle_left_leg: f64,
    pub muscle_trunk: f64,
    pub bone_mass: f64,
    pub visceral_fat: u32,
    pub calories: u32,
    pub metabolic_age: u32,
    pub water: f64,
}

impl Measurement {
    /// numeric value of a field, integers are widened to f64
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age as f64,
            Field::Height => self.height,
            Field::ActivityLevel => self.activity_level as f64,
            Field::Weight => self.weight,
            Field::Bmi => self.bmi,
            Field::Fat => self.fat,
            Field::FatRightArm => self.fat_right_arm,
            Field::FatLeftArm => self.fat_left_arm,
            Field::FatRightLeg => self.fat_right_leg,
            Field::FatLeftLeg => self.fat_left_leg,
            Field::FatTrunk => self.fat_trunk,
            Field::Muscle => self.muscle,
            Field::MuscleRightArm => self.muscle_right_arm,
            Field::MuscleLeftArm => self.muscle_left_arm,
            Field::MuscleRightLeg => self.muscle_right_leg,
            Field::MuscleLeftLeg => self.muscle_left_leg,
            Field::MuscleTrunk => self.muscle_trunk,
            Field::BoneMass => self.bone_mass,
            Field::VisceralFat => self.visceral_fat as f64,
            Field::Calories => self.calories as f64,
            Field::MetabolicAge => self.metabolic_age as f64,
            Field::Water => self.water,
        }
    }
}

/// Holds the compiled line grammar, build it once and reuse it for all the lines.
#[derive(Debug, Clone)]
pub struct LineParser {
    re: Regex,
}

impl LineParser {
    pub fn new() -> LineParser {
        // the pattern is a constant, failing here is a bug
        let re = Regex::new(LINE_PATTERN).expect("invalid line pattern");
        LineParser { re }
    }

    /// Extracts a measurement from one line.
    /// The tag sequence may be preceded and followed by other text,
    /// as the device prefixes each record with its own header.
    pub fn parse(&self, line: &str) -> Result<Measurement, ParseError> {
        let caps = self.re.captures(line).ok_or(ParseError::NoMatch)?;
        let datetime_str = format!("{} {}", &caps["date"], &caps["time"]);
        let timestamp = NaiveDateTime::parse_from_str(&datetime_str, DT_FORMAT).map_err(|e| {
            ParseError::Datetime {
                text: datetime_str.clone(),
                source: e,
            }
        })?;
        Ok(Measurement {
            timestamp,
            body_type: BodyType::from_code(&caps["body_type"])?,
            gender: Gender::from_code(&caps["gender"])?,
            age: number(&caps, "age")?,
            height: number(&caps, "height")?,
            activity_level: number(&caps, "activity_level")?,
            weight: number(&caps, "weight")?,
            bmi: number(&caps, "bmi")?,
            fat: number(&caps, "fat")?,
            fat_right_arm: number(&caps, "fat_right_arm")?,
            fat_left_arm: number(&caps, "fat_left_arm")?,
            fat_right_leg: number(&caps, "fat_right_leg")?,
            fat_left_leg: number(&caps, "fat_left_leg")?,
            fat_trunk: number(&caps, "fat_trunk")?,
            muscle: number(&caps, "muscle")?,
            muscle_right_arm: number(&caps, "muscle_right_arm")?,
            muscle_left_arm: number(&caps, "muscle_left_arm")?,
            muscle_right_leg: number(&caps, "muscle_right_leg")?,
            muscle_left_leg: number(&caps, "muscle_left_leg")?,
            muscle_trunk: number(&caps, "muscle_trunk")?,
            bone_mass: number(&caps, "bone_mass")?,
            visceral_fat: number(&caps, "visceral_fat")?,
            calories: number(&caps, "calories")?,
            metabolic_age: number(&caps, "metabolic_age")?,
            water: number(&caps, "water")?,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn number<T: std::str::FromStr>(caps: &Captures, field: &'static str) -> Result<T, ParseError> {
    let text = &caps[field];
    text.parse().map_err(|_| ParseError::Number {
        field,
        text: text.to_string(),
    })
}
