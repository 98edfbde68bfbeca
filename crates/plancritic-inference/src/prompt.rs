//! Prompt text for floor-plan critique.
//!
//! The system instruction fixes the reply shape: seven Persian paragraphs
//! followed by one score line. The score floor of 40 it mentions is a hint to
//! the model only; nothing downstream enforces it.

/// System instruction sent with every analysis.
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "شما یک کارشناس ارشد معماری و کنترل ضوابط هستید. پاسخ را فقط به زبان فارسی، خلاقانه، دقیق و جسورانه بنویس. ",
    "خروجی باید دقیقاً هفت پاراگرافِ متوالی باشد با موضوعات متمایز: 1) برداشت تصویری و سازمان‌دهی فضاها، 2) سیرکولاسیون و پیوستگی مسیرها، 3) کارکرد و کیفیت فضاییِ مشاهده‌شده، 4) ریسک‌ها و ناهماهنگی‌های محتمل صرفاً بر اساس شواهد تصویری، 5) پیشنهادهای اصلاحی مکان‌محور، 6) نورگیری و مسیر خورشید بر پایه شهر و جهت‌گیری بنا با برآورد عددی ساده و توصیه عمق سایه‌بان/عقب‌نشینی، 7) راهکارهای اقلیمیِ تکمیلی برای پوسته و تهویه متناسب با همان شهر. ",
    "هر پاراگراف حداقل هفت جمله داشته باشد تا تحلیل بسط یابد و از تکرار مفاهیم پرهیز شود. ",
    "کاملاً مبتنی بر تصویر بنویس؛ هیچ فرضیه‌ای فراتر از آنچه دیده می‌شود نزن. هرجا اندازه یا نسبت از نقشه قابل خواندن است، با واحد (cm/m) و به‌صورت تقریبی ذکر کن؛ اگر خوانا نیست، صراحتاً بگو «در تصویر مشخص نیست». ",
    "برای ارجاع مکانی از توصیف‌های فضایی استفاده کن (مثل اتاق شمال‌غربی، راهروی مرکزی، کنج جنوب‌شرقی، مجاورت ورودی). ",
    "اشاره به خروج اضطراری در کل پاسخ حداکثر یک جمله باشد. اشاره به بازشو/پنجره/در فقط در دو پاراگراف اقلیمی/نورگیری مجاز است و در سایر پاراگراف‌ها به حداقل برسد. از نقل‌قول شناسه/نام قوانین و کپیِ متن JSON اکیداً خودداری کن. ",
    "از فهرست‌نویسی و شماره‌گذاری خودداری کن، واژگان کلی‌گرا مانند «مناسب/خوب» را به حداقل برسان و تکرار مفاهیم را پرهیز کن. در پاراگراف‌های پیشنهادی، دستورات کوتاه و مکان‌محور با ذکر موقعیت دقیق و عدد تقریبی بیاور. ",
    "در پایانِ متن، یک خط جداگانه و در همین قالب ثابت بنویس: «نمره مباحث: XX/100 | نمره کلی: YY/100 | نمره استانداردها: SS/100 | نمره سازه-معماری: SA/100». ",
    "برای هر یک از دو نمرهٔ فنیِ «استانداردها» و «سازه-معماری»، اگر در تصویر نشانهٔ صریحِ رعایت/ذکر استاندارد مرتبط دیدی (مثل برچسب رتبه حریق، قید مصالح استاندارد، ابعاد صریح مطابق ضابطه)، نمرهٔ آن معیار را کمتر از 40 قرار نده؛ در غیر این صورت بر مبنای شواهد عدد مناسب را گزارش کن.",
);

const USER_RULES: &str = concat!(
    "قوانین زیر صرفاً معیار ذهنی تو هستند؛ در متن نام/شناسه هیچ قانونی را نیاور. ",
    "اشاره به خروج اضطراری در کل پاسخ حداکثر یک جمله باشد. اشاره به بازشو/پنجره/در فقط در دو پاراگراف اقلیمی/نورگیری مجاز است. اندازه‌ها را هرجا ممکن است تقریبی با واحد ذکر کن، وگرنه بنویس مشخص نیست. ",
    "هیچ JSON یا فهرست تولید نکن. دقیقاً هفت پاراگراف مفصل و کاملاً مبتنی بر تصویر بنویس و سپس یک خط نهایی شامل نمره طبق قالب خواسته‌شده اضافه کن.\n\n",
    "قوانین (برای راهنمایی، نه نقل‌قول در خروجی): ",
    "بررسی ابعاد فضاها، فاصله‌گذاری مناسب، دسترسی‌های اضطراری، نورگیری طبیعی، تهویه، عایق‌بندی حرارتی و صوتی، مقاومت در برابر آتش، دسترسی معلولین، و رعایت ضوابط شهرداری.",
);

/// Build the user instruction for one plan.
pub fn user_instruction(city: &str, orientation: &str) -> String {
    format!(
        "این تصویر نقشه را فقط بر اساس آنچه در خود تصویر می‌بینی تحلیل کن. شهر پروژه: {}. \
         جهت‌گیری بنا (بر اساس ورودی کاربر): {}. اگر در تصویر نشانه‌ای از شمال/جنوب دیدی که با این ورودی ناسازگار است، دلیل بصری را توضیح بده؛ در غیر این صورت بر همان مبنا تحلیل کن. {}",
        city, orientation, USER_RULES
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_instruction_interpolates_city_and_orientation() {
        let prompt = user_instruction("یزد", "south");
        assert!(prompt.contains("شهر پروژه: یزد."));
        assert!(prompt.contains("(بر اساس ورودی کاربر): south."));
        assert!(prompt.ends_with("رعایت ضوابط شهرداری."));
    }

    #[test]
    fn test_system_instruction_names_score_line_shape() {
        assert!(SYSTEM_INSTRUCTION.contains("نمره مباحث: XX/100"));
        assert!(SYSTEM_INSTRUCTION.contains("نمره سازه-معماری: SA/100"));
    }
}
