use std::path::{Path, PathBuf};

pub const HEADER_TRAIN: &str =
    "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";
pub const HEADER_TEST: &str =
    "PassengerId,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

/// Twenty labeled rows with missing ages, cabins and all three ports.
pub const TRAIN_ROWS: &[&str] = &[
    r#"1,0,3,"Braund, Mr. Owen Harris",male,22,1,0,A/5 21171,7.25,,S"#,
    r#"2,1,1,"Cumings, Mrs. John Bradley (Florence Briggs Thayer)",female,38,1,0,PC 17599,71.2833,C85,C"#,
    r#"3,1,3,"Heikkinen, Miss. Laina",female,26,0,0,STON/O2. 3101282,7.925,,S"#,
    r#"4,1,1,"Futrelle, Mrs. Jacques Heath (Lily May Peel)",female,35,1,0,113803,53.1,C123,S"#,
    r#"5,0,3,"Allen, Mr. William Henry",male,35,0,0,373450,8.05,,S"#,
    r#"6,0,3,"Moran, Mr. James",male,,0,0,330877,8.4583,,Q"#,
    r#"7,0,1,"McCarthy, Mr. Timothy J",male,54,0,0,17463,51.8625,E46,S"#,
    r#"8,0,3,"Palsson, Master. Gosta Leonard",male,2,3,1,349909,21.075,,S"#,
    r#"9,1,3,"Johnson, Mrs. Oscar W (Elisabeth Vilhelmina Berg)",female,27,0,2,347742,11.1333,,S"#,
    r#"10,1,2,"Nasser, Mrs. Nicholas (Adele Achem)",female,14,1,0,237736,30.0708,,C"#,
    r#"11,1,3,"Sandstrom, Miss. Marguerite Rut",female,4,1,1,PP 9549,16.7,G6,S"#,
    r#"12,1,1,"Bonnell, Miss. Elizabeth",female,58,0,0,113783,26.55,C103,S"#,
    r#"13,0,3,"Saundercock, Mr. William Henry",male,20,0,0,A/5. 2151,8.05,,S"#,
    r#"14,0,3,"Andersson, Mr. Anders Johan",male,39,1,5,347082,31.275,,S"#,
    r#"15,0,3,"Vestrom, Miss. Hulda Amanda Adolfina",female,14,0,0,350406,7.8542,,S"#,
    r#"16,1,2,"Hewlett, Mrs. (Mary D Kingcome) ",female,55,0,0,248706,16,,S"#,
    r#"17,0,3,"Rice, Master. Eugene",male,2,4,1,382652,29.125,,Q"#,
    r#"18,1,2,"Williams, Mr. Charles Eugene",male,,0,0,244373,13,,S"#,
    r#"19,0,3,"Vander Planke, Mrs. Julius (Emelia Maria Vandemoortele)",female,31,1,0,345763,18,,S"#,
    r#"20,1,3,"Masselmani, Mrs. Fatima",female,,0,0,2649,7.225,,C"#,
];

/// Unlabeled rows: no Cherbourg passengers and one missing fare.
pub const TEST_ROWS: &[&str] = &[
    r#"892,3,"Kelly, Mr. James",male,34.5,0,0,330911,7.8292,,Q"#,
    r#"893,3,"Wilkes, Mrs. James (Ellen Needs)",female,47,1,0,363272,7,,S"#,
    r#"894,2,"Myles, Mr. Thomas Francis",male,62,0,0,240276,9.6875,,Q"#,
    r#"895,3,"Wirz, Mr. Albert",male,27,0,0,315154,8.6625,,S"#,
    r#"896,3,"Hirvonen, Mrs. Alexander (Helga E Lindqvist)",female,22,1,1,3101298,12.2875,,S"#,
    r#"1044,3,"Storey, Mr. Thomas",male,60.5,0,0,3701,,,S"#,
];

/// Smallest useful training table: two survivors, two casualties, both sexes.
pub const TINY_TRAIN_ROWS: &[&str] = &[
    r#"1,0,3,"Braund, Mr. Owen Harris",male,22,1,0,A/5 21171,7.25,,S"#,
    r#"2,1,1,"Cumings, Mrs. John Bradley (Florence Briggs Thayer)",female,38,1,0,PC 17599,71.2833,C85,C"#,
    r#"3,1,3,"Heikkinen, Miss. Laina",female,26,0,0,STON/O2. 3101282,7.925,,S"#,
    r#"5,0,3,"Allen, Mr. William Henry",male,35,0,0,373450,8.05,,S"#,
];

pub fn csv(header: &str, rows: &[&str]) -> String {
    let mut text = String::from(header);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// Write train and test CSVs into `dir` and return their paths.
pub fn write_tables(dir: &Path, train_rows: &[&str], test_rows: &[&str]) -> (PathBuf, PathBuf) {
    let train = dir.join("train.csv");
    let test = dir.join("test.csv");
    std::fs::write(&train, csv(HEADER_TRAIN, train_rows)).expect("write train.csv");
    std::fs::write(&test, csv(HEADER_TEST, test_rows)).expect("write test.csv");
    (train, test)
}
