//! Client-facing response messages

pub const BOOK_NOT_FOUND: &str = "Kitob topilmadi";
pub const BOOK_FIELDS_REQUIRED: &str = "Barcha maydonlar to'ldirilishi kerak";
pub const BOOK_CREATED: &str = "Kitob qo'shildi";
pub const BOOK_UPDATED: &str = "Kitob yangilandi";

pub const REGISTER_FIELDS_REQUIRED: &str = "Ism, parol va yosh kerak";
pub const USER_EXISTS: &str = "Foydalanuvchi mavjud";
pub const REGISTERED: &str = "Ro'yxatdan o'tdi";

pub const LOGIN_FIELDS_REQUIRED: &str = "Ism va parol kerak";
pub const LOGIN_FAILED: &str = "Login xato";
pub const WELCOME: &str = "Xush kelibsiz";
