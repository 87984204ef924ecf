//! NEIS-shaped payloads for tests.

pub struct Row {
    code: &'static str,
    name: &'static str,
    ymd: &'static str,
    dishes: &'static str,
    calories: &'static str,
    nutrition: &'static str,
}

pub fn row(
    code: &'static str,
    name: &'static str,
    ymd: &'static str,
    dishes: &'static str,
    calories: &'static str,
    nutrition: &'static str,
) -> Row {
    Row { code, name, ymd, dishes, calories, nutrition }
}

pub fn status_xml(code: &str, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <RESULT>\n<CODE>{code}</CODE>\n<MESSAGE><![CDATA[{message}]]></MESSAGE>\n</RESULT>"
    )
}

/// Success payload, including the `head` block NEIS sends with every data response.
pub fn rows_xml(rows: &[Row]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<mealServiceDietInfo>\n\
         <head><list_total_count>1</list_total_count>\
         <RESULT><CODE>INFO-000</CODE><MESSAGE><![CDATA[정상 처리되었습니다.]]></MESSAGE></RESULT></head>\n",
    );
    for r in rows {
        xml.push_str(&format!(
            "<row>\n\
             <ATPT_OFCDC_SC_CODE>J10</ATPT_OFCDC_SC_CODE>\n\
             <SD_SCHUL_CODE>7531100</SD_SCHUL_CODE>\n\
             <MMEAL_SC_CODE>{}</MMEAL_SC_CODE>\n\
             <MMEAL_SC_NM><![CDATA[{}]]></MMEAL_SC_NM>\n\
             <MLSV_YMD>{}</MLSV_YMD>\n\
             <DDISH_NM><![CDATA[{}]]></DDISH_NM>\n\
             <CAL_INFO><![CDATA[{}]]></CAL_INFO>\n\
             <NTR_INFO><![CDATA[{}]]></NTR_INFO>\n\
             </row>\n",
            r.code, r.name, r.ymd, r.dishes, r.calories, r.nutrition
        ));
    }
    xml.push_str("</mealServiceDietInfo>");
    xml
}

pub fn lunch_day_xml() -> String {
    rows_xml(&[
        row("1", "조식", "20240101", "누룽지<br/>계란후라이1.", "420 Kcal", "탄수화물(g) : 55.0"),
        row(
            "2",
            "중식",
            "20240101",
            "쌀밥<br/>쇠고기미역국5.6.16.<br/>배추김치9.",
            "812.5 Kcal",
            "탄수화물(g) : 120.4<br/>단백질(g) : 32.1<br/>지방(g) : 18.9",
        ),
    ])
}
