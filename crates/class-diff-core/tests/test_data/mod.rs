//! 测试数据集模块
//!
//! 提供成对的 C# 类型声明测试示例

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

pub const CALCULATOR: &str = r#"
using System;

namespace Demo
{
    public class Calculator
    {
        private int _count;

        public int Count { get; private set; }

        public event EventHandler Changed;

        public int Add(int a, int b)
        {
            return a + b;
        }

        protected double Sqrt(double x)
        {
            return Math.Sqrt(x);
        }
    }
}
"#;

/// 与 `CALCULATOR` 只有注释和排版不同
pub const CALCULATOR_REFORMATTED: &str = r#"
using System;

namespace Demo
{
    /// <summary>A calculator.</summary>
    public class Calculator
    {
        private int _count; // backing counter

        public int Count
        {
            get;
            private set;
        }

        public event EventHandler Changed;

        public int Add(int a, int b) { return a + b; }

        /* square root */
        protected double Sqrt(double x)
        {
            return Math.Sqrt(
                x);
        }
    }
}
"#;

/// `Add` 的操作数交换了顺序
pub const CALCULATOR_SWAPPED_OPERANDS: &str = r#"
using System;

namespace Demo
{
    public class Calculator
    {
        private int _count;

        public int Count { get; private set; }

        public event EventHandler Changed;

        public int Add(int a, int b)
        {
            return b + a;
        }

        protected double Sqrt(double x)
        {
            return Math.Sqrt(x);
        }
    }
}
"#;

/// 多了一个公共方法 `Multiply`
pub const CALCULATOR_EXTRA_METHOD: &str = r#"
using System;

namespace Demo
{
    public class Calculator
    {
        private int _count;

        public int Count { get; private set; }

        public event EventHandler Changed;

        public int Add(int a, int b)
        {
            return a + b;
        }

        public int Multiply(int a, int b)
        {
            return a * b;
        }

        protected double Sqrt(double x)
        {
            return Math.Sqrt(x);
        }
    }
}
"#;

/// `Sqrt` 从 protected 改为 private
pub const CALCULATOR_PRIVATE_SQRT: &str = r#"
using System;

namespace Demo
{
    public class Calculator
    {
        private int _count;

        public int Count { get; private set; }

        public event EventHandler Changed;

        public int Add(int a, int b)
        {
            return a + b;
        }

        private double Sqrt(double x)
        {
            return Math.Sqrt(x);
        }
    }
}
"#;

/// 字段、属性、事件和方法签名都发生了变化
pub const CALCULATOR_RETYPED: &str = r#"
using System;

namespace Demo
{
    public class Calculator
    {
        private long _count;

        public int Count { get; set; }

        public event Action Changed;

        public static int Add(int a, int b)
        {
            return a + b;
        }

        protected double Sqrt(float x)
        {
            return Math.Sqrt(x);
        }
    }
}
"#;

/// `Add` 的局部变量被重命名
pub const ACCUMULATOR_TOTAL: &str = r#"
public class Accumulator
{
    public int Add(int a, int b)
    {
        int total = a + b;
        return total;
    }
}
"#;

pub const ACCUMULATOR_SUM: &str = r#"
public class Accumulator
{
    public int Add(int a, int b)
    {
        int sum = a + b;
        return sum;
    }
}
"#;

/// 只包含抽象成员的类型
pub const ABSTRACT_SHAPE: &str = r#"
public abstract class Shape
{
    public abstract double Area();
    public abstract double Perimeter();
}
"#;

pub const ABSTRACT_SHAPE_COMMENTED: &str = r#"
public abstract class Shape
{
    // 注释不影响比较
    public abstract double Area();

    public abstract double Perimeter();
}
"#;

/// 抽象成员与具体成员混合
pub const MIXED_SHAPE: &str = r#"
public abstract class Shape
{
    public abstract double Area();

    public string Describe()
    {
        return "Shape with area " + Area();
    }
}
"#;

pub const MIXED_SHAPE_CHANGED: &str = r#"
public abstract class Shape
{
    public abstract double Area();

    public string Describe()
    {
        var rounded = Math.Round(Area(), 2);
        return "Area: " + rounded;
    }
}
"#;

pub const REPOSITORY_INTERFACE: &str = r#"
public interface IRepository<T>
{
    T Find(int id);
    void Save(T item);
    int Count { get; }
}
"#;

pub const REPOSITORY_INTERFACE_CHANGED: &str = r#"
public interface IRepository<T>
{
    T Find(long id);
    void Save(T item);
    void Delete(T item);
    int Count { get; }
}
"#;

/// 同一文件中包含多个类型
pub const MULTIPLE_TYPES: &str = r#"
namespace Demo
{
    public struct Money
    {
        public decimal Amount;
    }

    public class Order
    {
        public Money Total() { return new Money(); }

        private class Line
        {
            public int Quantity;
        }
    }
}
"#;

pub const MULTIPLE_TYPES_CHANGED: &str = r#"
namespace Demo
{
    public struct Money
    {
        public decimal Amount;
        public string Currency;
    }

    public class Order
    {
        public Money Total() { return new Money(); }

        private class Line
        {
            public long Quantity;
        }
    }
}
"#;

pub const NOT_A_TYPE: &str = r#"
using System;
using System.Collections.Generic;
"#;

/// 一对待比较的源码
pub struct SourcePair {
    pub name: &'static str,
    pub old: &'static str,
    pub new: &'static str,
}

/// 所有成对的测试源码
pub fn source_pairs() -> Vec<SourcePair> {
    vec![
        SourcePair {
            name: "reformatted",
            old: CALCULATOR,
            new: CALCULATOR_REFORMATTED,
        },
        SourcePair {
            name: "swapped_operands",
            old: CALCULATOR,
            new: CALCULATOR_SWAPPED_OPERANDS,
        },
        SourcePair {
            name: "extra_method",
            old: CALCULATOR,
            new: CALCULATOR_EXTRA_METHOD,
        },
        SourcePair {
            name: "private_sqrt",
            old: CALCULATOR,
            new: CALCULATOR_PRIVATE_SQRT,
        },
        SourcePair {
            name: "retyped",
            old: CALCULATOR,
            new: CALCULATOR_RETYPED,
        },
        SourcePair {
            name: "renamed_local",
            old: ACCUMULATOR_TOTAL,
            new: ACCUMULATOR_SUM,
        },
        SourcePair {
            name: "abstract_only",
            old: ABSTRACT_SHAPE,
            new: ABSTRACT_SHAPE_COMMENTED,
        },
        SourcePair {
            name: "mixed_shape",
            old: MIXED_SHAPE,
            new: MIXED_SHAPE_CHANGED,
        },
        SourcePair {
            name: "interface",
            old: REPOSITORY_INTERFACE,
            new: REPOSITORY_INTERFACE_CHANGED,
        },
        SourcePair {
            name: "multiple_types",
            old: MULTIPLE_TYPES,
            new: MULTIPLE_TYPES_CHANGED,
        },
    ]
}

/// 写入临时目录的测试数据集
pub struct TestDataSet {
    pub temp_dir: TempDir,
    pub files: Vec<TestFile>,
}

/// 测试文件信息
pub struct TestFile {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub description: String,
}

impl TestDataSet {
    /// 把所有源码对写成 `<name>.old.cs` / `<name>.new.cs`
    pub fn create_csharp_dataset() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let mut files = Vec::new();

        for pair in source_pairs() {
            let old_path = temp_dir.path().join(format!("{}.old.cs", pair.name));
            let new_path = temp_dir.path().join(format!("{}.new.cs", pair.name));
            std::fs::write(&old_path, pair.old)?;
            std::fs::write(&new_path, pair.new)?;
            files.push(TestFile {
                old_path,
                new_path,
                description: pair.name.to_string(),
            });
        }

        Ok(Self { temp_dir, files })
    }
}
